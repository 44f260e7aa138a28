/// TMDB catalog client
///
/// Thin client over the TMDB v3 REST API. Trending and search use the
/// "all"/"multi" endpoints, which interleave person results with movies
/// and TV shows; persons are filtered out before the page reaches anyone
/// else. Certification endpoints are normalized into the resolver's
/// country-record shape at this boundary.
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{MediaListItem, MediaPage},
    services::{
        certification::{CertificationEntry, CountryCertifications},
        provider::MetadataProvider,
    },
};

#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(default = "one")]
    page: i64,
    #[serde(default)]
    results: Vec<Value>,
    #[serde(default)]
    total_pages: i64,
    #[serde(default)]
    total_results: i64,
}

fn one() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
struct ReleaseDatesResponse {
    #[serde(default)]
    results: Vec<CountryReleaseDates>,
}

#[derive(Debug, Deserialize)]
struct CountryReleaseDates {
    iso_3166_1: String,
    #[serde(default)]
    release_dates: Vec<ReleaseDateEntry>,
}

#[derive(Debug, Deserialize)]
struct ReleaseDateEntry {
    #[serde(default)]
    certification: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentRatingsResponse {
    #[serde(default)]
    results: Vec<CountryContentRating>,
}

#[derive(Debug, Deserialize)]
struct CountryContentRating {
    iso_3166_1: String,
    #[serde(default)]
    rating: Option<String>,
}

impl TmdbClient {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }

    /// GET a TMDB path and deserialize the JSON body. Non-success statuses
    /// become `ExternalApi` errors; a 404 is reported via its own variant
    /// so detail lookups can translate it to "no such title".
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound("Not found".to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }

    /// Keeps only movie/tv entries of an "all"/"multi" page and types them.
    fn into_media_page(&self, raw: RawPage) -> MediaPage {
        let results: Vec<MediaListItem> = raw
            .results
            .into_iter()
            .filter(|value| {
                matches!(
                    value.get("media_type").and_then(Value::as_str),
                    Some("movie") | Some("tv")
                )
            })
            .filter_map(|value| serde_json::from_value(value).ok())
            .collect();

        MediaPage {
            page: raw.page,
            results,
            total_pages: raw.total_pages,
            total_results: raw.total_results,
        }
    }

    async fn fetch_detail(&self, path: &str, language: &str) -> AppResult<Option<Value>> {
        match self.get_json(path, &[("language", language)]).await {
            Ok(detail) => Ok(Some(detail)),
            Err(AppError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Failure-absorbing fetch for enrichment data. Anything that goes
    /// wrong upstream is logged and collapses to the provided fallback.
    async fn fetch_or<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        fallback: T,
    ) -> T {
        match self.get_json(path, query).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Enrichment lookup failed, continuing without it");
                fallback
            }
        }
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbClient {
    async fn trending(&self, time_window: &str, language: &str, page: u32) -> AppResult<MediaPage> {
        let path = format!("/trending/all/{}", time_window);
        let page_param = page.to_string();
        let raw: RawPage = self
            .get_json(&path, &[("language", language), ("page", &page_param)])
            .await?;

        let page = self.into_media_page(raw);
        tracing::info!(
            time_window = %time_window,
            results = page.results.len(),
            "Trending page fetched"
        );
        Ok(page)
    }

    async fn search(&self, query: &str, page: u32, language: &str) -> AppResult<MediaPage> {
        if query.chars().count() < 2 {
            return Ok(MediaPage::empty());
        }

        let page_param = page.to_string();
        let raw: RawPage = self
            .get_json(
                "/search/multi",
                &[
                    ("query", query),
                    ("page", &page_param),
                    ("language", language),
                    ("include_adult", "false"),
                ],
            )
            .await?;

        let page = self.into_media_page(raw);
        tracing::info!(query = %query, results = page.results.len(), "Search completed");
        Ok(page)
    }

    async fn movie_detail(&self, id: i64, language: &str) -> AppResult<Option<Value>> {
        self.fetch_detail(&format!("/movie/{}", id), language).await
    }

    async fn tv_detail(&self, id: i64, language: &str) -> AppResult<Option<Value>> {
        self.fetch_detail(&format!("/tv/{}", id), language).await
    }

    async fn movie_certifications(&self, id: i64) -> Vec<CountryCertifications> {
        let response: ReleaseDatesResponse = self
            .fetch_or(
                &format!("/movie/{}/release_dates", id),
                &[],
                ReleaseDatesResponse { results: vec![] },
            )
            .await;

        response
            .results
            .into_iter()
            .map(|country| {
                CountryCertifications::new(
                    country.iso_3166_1,
                    country
                        .release_dates
                        .into_iter()
                        .map(|rd| CertificationEntry::new(rd.certification, rd.release_date))
                        .collect(),
                )
            })
            .collect()
    }

    async fn tv_certifications(&self, id: i64) -> Vec<CountryCertifications> {
        let response: ContentRatingsResponse = self
            .fetch_or(
                &format!("/tv/{}/content_ratings", id),
                &[],
                ContentRatingsResponse { results: vec![] },
            )
            .await;

        response
            .results
            .into_iter()
            .map(|country| CountryCertifications::single(country.iso_3166_1, country.rating))
            .collect()
    }

    async fn movie_credits(&self, id: i64) -> Value {
        self.fetch_or(
            &format!("/movie/{}/credits", id),
            &[],
            json!({ "cast": [], "crew": [] }),
        )
        .await
    }

    async fn tv_credits(&self, id: i64) -> Value {
        self.fetch_or(
            &format!("/tv/{}/credits", id),
            &[],
            json!({ "cast": [], "crew": [] }),
        )
        .await
    }

    async fn movie_watch_providers(&self, id: i64, region: &str) -> Value {
        let data: Value = self
            .fetch_or(&format!("/movie/{}/watch/providers", id), &[], json!({}))
            .await;
        region_providers(&data, region)
    }

    async fn tv_watch_providers(&self, id: i64, region: &str) -> Value {
        let data: Value = self
            .fetch_or(&format!("/tv/{}/watch/providers", id), &[], json!({}))
            .await;
        region_providers(&data, region)
    }
}

/// Picks one region's provider object out of the watch-providers payload.
fn region_providers(data: &Value, region: &str) -> Value {
    data.get("results")
        .and_then(|results| results.get(region))
        .cloned()
        .unwrap_or_else(|| json!({}))
}
