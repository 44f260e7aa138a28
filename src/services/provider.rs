use serde_json::Value;

#[cfg(test)]
use mockall::automock;

use crate::{
    error::AppResult,
    models::MediaPage,
    services::certification::CountryCertifications,
};

/// External media catalog abstraction.
///
/// Handlers and the enrichment layer only talk to this trait, so the
/// concrete TMDB client can be swapped for a mock in tests.
///
/// Listing and detail calls surface upstream failures as errors. The
/// certification, credits and watch-provider calls instead absorb failures
/// into empty results: they decorate a response that is already worth
/// serving, so a broken enrichment lookup must never fail the request.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Trending movies and TV shows for a time window ("day" or "week").
    async fn trending(&self, time_window: &str, language: &str, page: u32) -> AppResult<MediaPage>;

    /// Multi search across movies and TV shows. Queries shorter than two
    /// characters yield an empty page without an outbound call.
    async fn search(&self, query: &str, page: u32, language: &str) -> AppResult<MediaPage>;

    /// Full movie detail payload, or `None` when the catalog has no such id.
    async fn movie_detail(&self, id: i64, language: &str) -> AppResult<Option<Value>>;

    /// Full TV detail payload, or `None` when the catalog has no such id.
    async fn tv_detail(&self, id: i64, language: &str) -> AppResult<Option<Value>>;

    /// Per-country movie certifications; empty on any upstream failure.
    async fn movie_certifications(&self, id: i64) -> Vec<CountryCertifications>;

    /// Per-country TV content ratings; empty on any upstream failure.
    async fn tv_certifications(&self, id: i64) -> Vec<CountryCertifications>;

    /// Cast and crew; empty lists on any upstream failure.
    async fn movie_credits(&self, id: i64) -> Value;

    /// Cast and crew; empty lists on any upstream failure.
    async fn tv_credits(&self, id: i64) -> Value;

    /// Watch providers for one region; empty object on any upstream failure.
    async fn movie_watch_providers(&self, id: i64, region: &str) -> Value;

    /// Watch providers for one region; empty object on any upstream failure.
    async fn tv_watch_providers(&self, id: i64, region: &str) -> Value;
}
