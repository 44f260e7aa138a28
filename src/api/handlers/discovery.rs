//! Catalog proxy handlers: trending, search and detail endpoints, each
//! enriched with the resolved certification and normalized rating tier.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{MediaPage, MediaType},
    services::{certification::RatingTier, enrichment},
};

use super::super::AppState;

fn default_language() -> String {
    "en-US".to_string()
}

fn default_page() -> u32 {
    1
}

fn default_time_window() -> String {
    "day".to_string()
}

#[derive(Debug, Deserialize)]
pub struct TrendingQuery {
    #[serde(default = "default_time_window")]
    pub time_window: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_page")]
    pub page: u32,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_page")]
    pub page: u32,
}

#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    #[serde(default = "default_language")]
    pub language: String,
}

/// A listing page plus the image base clients prepend to poster paths.
#[derive(Debug, Serialize)]
pub struct ListingResponse {
    #[serde(flatten)]
    pub page: MediaPage,
    pub image_base: String,
}

#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub detail: Value,
    pub certification: Option<String>,
    pub rating_tier: Option<RatingTier>,
    pub credits: Value,
    pub watch_providers: Value,
    pub image_base: String,
}

pub async fn trending(
    State(state): State<AppState>,
    Query(params): Query<TrendingQuery>,
) -> AppResult<Json<ListingResponse>> {
    let mut page = state
        .provider
        .trending(&params.time_window, &params.language, params.page)
        .await?;

    enrichment::enrich_page(
        &state.provider,
        &mut page,
        &state.config.preferred_countries,
        state.config.certification_lookup_limit,
    )
    .await;

    Ok(Json(ListingResponse {
        page,
        image_base: state.config.tmdb_image_base.clone(),
    }))
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<ListingResponse>> {
    let mut page = state
        .provider
        .search(&params.query, params.page, &params.language)
        .await?;

    enrichment::enrich_page(
        &state.provider,
        &mut page,
        &state.config.preferred_countries,
        state.config.certification_lookup_limit,
    )
    .await;

    Ok(Json(ListingResponse {
        page,
        image_base: state.config.tmdb_image_base.clone(),
    }))
}

pub async fn movie_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<DetailQuery>,
) -> AppResult<Json<DetailResponse>> {
    let detail = state
        .provider
        .movie_detail(id, &params.language)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Movie {} not found", id)))?;

    Ok(Json(detail_response(&state, MediaType::Movie, id, detail).await))
}

pub async fn tv_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<DetailQuery>,
) -> AppResult<Json<DetailResponse>> {
    let detail = state
        .provider
        .tv_detail(id, &params.language)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("TV show {} not found", id)))?;

    Ok(Json(detail_response(&state, MediaType::Tv, id, detail).await))
}

/// Assembles the detail payload: certification, credits and watch
/// providers all degrade to empty values rather than failing the response.
async fn detail_response(
    state: &AppState,
    media_type: MediaType,
    id: i64,
    detail: Value,
) -> DetailResponse {
    let (records, credits, watch_providers) = match media_type {
        MediaType::Movie => (
            state.provider.movie_certifications(id).await,
            state.provider.movie_credits(id).await,
            state
                .provider
                .movie_watch_providers(id, &state.config.watch_region)
                .await,
        ),
        MediaType::Tv => (
            state.provider.tv_certifications(id).await,
            state.provider.tv_credits(id).await,
            state
                .provider
                .tv_watch_providers(id, &state.config.watch_region)
                .await,
        ),
    };

    let (certification, rating_tier) =
        enrichment::lookup_outcome(&records, &state.config.preferred_countries);

    DetailResponse {
        detail,
        certification,
        rating_tier,
        credits,
        watch_providers,
        image_base: state.config.tmdb_image_base.clone(),
    }
}
