use axum::{
    http::StatusCode,
    middleware,
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::identity::{make_span_with_request_id, request_id_middleware};

use super::handlers::{discovery, saved};
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

/// API routes under /api
fn api_routes() -> Router<AppState> {
    Router::new()
        // Public catalog proxy (discovery needs no identity)
        .route("/tmdb/trending", get(discovery::trending))
        .route("/tmdb/search", get(discovery::search))
        .route("/tmdb/movie/:id", get(discovery::movie_detail))
        .route("/tmdb/tv/:id", get(discovery::tv_detail))
        // Saved media (identity required via x-user-id)
        .route("/saved", get(saved::list).post(saved::create))
        .route("/saved/:id", put(saved::update).delete(saved::remove))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
