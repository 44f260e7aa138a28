use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::services::certification::RatingTier;

/// Kind of catalog entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for MediaType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "movie" => Ok(MediaType::Movie),
            "tv" => Ok(MediaType::Tv),
            other => Err(format!("unknown media type: {other}")),
        }
    }
}

/// One item of a trending/search page. The catalog payload is passed
/// through untouched via `extra`; only the fields this service reads or
/// attaches are typed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaListItem {
    pub id: i64,
    pub media_type: MediaType,

    /// Raw certification string resolved for the preferred countries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certification: Option<String>,

    /// Normalized audience tier derived from `certification`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_tier: Option<RatingTier>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A paginated listing in the catalog's page shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaPage {
    pub page: i64,
    pub results: Vec<MediaListItem>,
    pub total_pages: i64,
    pub total_results: i64,
}

impl MediaPage {
    /// The page returned when upstream has nothing to say (short queries,
    /// pages past the end).
    pub fn empty() -> Self {
        Self {
            page: 1,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }
}

/// A user's saved title with their like/dislike verdict.
/// `liked` is NULL while the item is saved without a verdict.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SavedMedia {
    pub id: i64,
    pub user_id: Uuid,
    pub tmdb_id: i64,
    #[sqlx(try_from = "String")]
    pub media_type: MediaType,
    pub liked: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_media_type_serialization() {
        assert_eq!(serde_json::to_string(&MediaType::Movie).unwrap(), "\"movie\"");
        assert_eq!(serde_json::to_string(&MediaType::Tv).unwrap(), "\"tv\"");
    }

    #[test]
    fn test_media_type_try_from() {
        assert_eq!(MediaType::try_from("tv".to_string()), Ok(MediaType::Tv));
        assert!(MediaType::try_from("person".to_string()).is_err());
    }

    #[test]
    fn test_list_item_passes_catalog_fields_through() {
        let item: MediaListItem = serde_json::from_value(json!({
            "id": 603,
            "media_type": "movie",
            "title": "The Matrix",
            "poster_path": "/abc.jpg",
            "vote_average": 8.2
        }))
        .unwrap();

        assert_eq!(item.id, 603);
        assert_eq!(item.media_type, MediaType::Movie);
        assert_eq!(item.certification, None);
        assert_eq!(item.extra["title"], json!("The Matrix"));

        let out = serde_json::to_value(&item).unwrap();
        assert_eq!(out["poster_path"], json!("/abc.jpg"));
        // Absent enrichment fields stay off the wire entirely.
        assert!(out.get("certification").is_none());
        assert!(out.get("rating_tier").is_none());
    }
}
