//! Repository for the `saved_media` table.
//!
//! Every query is scoped by `user_id`: a row belonging to another user is
//! indistinguishable from a missing row.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{MediaType, SavedMedia},
};

const COLUMNS: &str = "id, user_id, tmdb_id, media_type, liked, created_at, updated_at";

/// All saved items for a user: unrated items first, then most recently
/// updated.
pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> AppResult<Vec<SavedMedia>> {
    let items = sqlx::query_as::<_, SavedMedia>(&format!(
        "SELECT {COLUMNS} FROM saved_media \
         WHERE user_id = $1 \
         ORDER BY CASE WHEN liked IS NULL THEN 0 ELSE 1 END, updated_at DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

/// Inserts or updates the user's entry for one title. Saving an already
/// saved title replaces its liked verdict.
pub async fn upsert(
    pool: &PgPool,
    user_id: Uuid,
    tmdb_id: i64,
    media_type: MediaType,
    liked: Option<bool>,
) -> AppResult<SavedMedia> {
    let saved = sqlx::query_as::<_, SavedMedia>(&format!(
        "INSERT INTO saved_media (user_id, tmdb_id, media_type, liked) \
         VALUES ($1, $2, $3, $4) \
         ON CONFLICT (user_id, tmdb_id, media_type) \
         DO UPDATE SET liked = EXCLUDED.liked, updated_at = now() \
         RETURNING {COLUMNS}"
    ))
    .bind(user_id)
    .bind(tmdb_id)
    .bind(media_type.as_str())
    .bind(liked)
    .fetch_one(pool)
    .await?;

    Ok(saved)
}

/// Updates the liked verdict of one saved row. A `None` verdict keeps the
/// current value. Returns `None` when the row does not exist for this user.
pub async fn set_liked(
    pool: &PgPool,
    user_id: Uuid,
    id: i64,
    liked: Option<bool>,
) -> AppResult<Option<SavedMedia>> {
    let saved = sqlx::query_as::<_, SavedMedia>(&format!(
        "UPDATE saved_media \
         SET liked = COALESCE($3, liked), updated_at = now() \
         WHERE id = $1 AND user_id = $2 \
         RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(user_id)
    .bind(liked)
    .fetch_optional(pool)
    .await?;

    Ok(saved)
}

/// Deletes one saved row; returns whether a row was actually removed.
pub async fn delete(pool: &PgPool, user_id: Uuid, id: i64) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM saved_media WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
