//! Saved-media handlers: per-user like/dislike bookkeeping.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    db::saved_media,
    error::{AppError, AppResult},
    middleware::identity::UserId,
    models::{MediaType, SavedMedia},
};

use super::super::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveMediaRequest {
    pub tmdb_id: i64,
    pub media_type: MediaType,
    #[serde(default)]
    pub liked: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSavedRequest {
    #[serde(default)]
    pub liked: Option<bool>,
}

pub async fn list(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> AppResult<Json<Vec<SavedMedia>>> {
    let items = saved_media::list_for_user(&state.db, user_id).await?;
    Ok(Json(items))
}

pub async fn create(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Json(req): Json<SaveMediaRequest>,
) -> AppResult<(StatusCode, Json<SavedMedia>)> {
    if req.tmdb_id < 1 {
        return Err(AppError::InvalidInput(
            "tmdb_id must be a positive integer".to_string(),
        ));
    }

    let saved =
        saved_media::upsert(&state.db, user_id, req.tmdb_id, req.media_type, req.liked).await?;

    tracing::info!(
        user_id = %user_id,
        tmdb_id = req.tmdb_id,
        media_type = %req.media_type,
        "Media saved"
    );

    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn update(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<i64>,
    Json(req): Json<UpdateSavedRequest>,
) -> AppResult<Json<SavedMedia>> {
    let saved = saved_media::set_liked(&state.db, user_id, id, req.liked)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Saved media {} not found", id)))?;

    Ok(Json(saved))
}

pub async fn remove(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let deleted = saved_media::delete(&state.db, user_id, id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("Saved media {} not found", id)));
    }

    Ok(StatusCode::NO_CONTENT)
}
