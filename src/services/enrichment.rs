//! Bounded certification enrichment for listing pages.
//!
//! Each enriched item costs one extra catalog round trip, so only a prefix
//! of the page gets a lookup; the bound comes from configuration
//! (`certification_lookup_limit`). Items past the prefix, and items whose
//! lookup turned up nothing, simply carry no certification fields.

use std::sync::Arc;

use crate::{
    models::{MediaPage, MediaType},
    services::{
        certification::{self, RatingTier},
        provider::MetadataProvider,
    },
};

/// Resolves and attaches `certification` / `rating_tier` to the first
/// `limit` items of `page`, looking items up in parallel.
///
/// Lookup failures have already been absorbed into empty record sets by
/// the provider, so enrichment can degrade but never fail the page.
pub async fn enrich_page(
    provider: &Arc<dyn MetadataProvider>,
    page: &mut MediaPage,
    preferred_countries: &[String],
    limit: usize,
) {
    let mut tasks = Vec::new();

    for (index, item) in page.results.iter().take(limit).enumerate() {
        let provider = Arc::clone(provider);
        let preferred = preferred_countries.to_vec();
        let media_type = item.media_type;
        let id = item.id;

        let task = tokio::spawn(async move {
            let records = match media_type {
                MediaType::Movie => provider.movie_certifications(id).await,
                MediaType::Tv => provider.tv_certifications(id).await,
            };
            lookup_outcome(&records, &preferred)
        });
        tasks.push((index, task));
    }

    for (index, task) in tasks {
        match task.await {
            Ok((certification, rating_tier)) => {
                let item = &mut page.results[index];
                item.certification = certification;
                item.rating_tier = rating_tier;
            }
            Err(e) => {
                tracing::error!(error = %e, "Certification lookup task failed");
            }
        }
    }
}

/// Resolver then normalizer over one title's records.
pub fn lookup_outcome(
    records: &[certification::CountryCertifications],
    preferred: &[String],
) -> (Option<String>, Option<RatingTier>) {
    let raw = certification::resolve(records, preferred).map(|r| r.value.to_string());
    let tier = raw.as_deref().and_then(RatingTier::from_raw);
    (raw, tier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::certification::CountryCertifications;
    use crate::services::provider::MockMetadataProvider;
    use serde_json::json;

    fn page_of(items: &[(i64, &str)]) -> MediaPage {
        let results = items
            .iter()
            .map(|(id, media_type)| {
                serde_json::from_value(json!({"id": id, "media_type": media_type})).unwrap()
            })
            .collect();
        MediaPage {
            page: 1,
            total_pages: 1,
            total_results: items.len() as i64,
            results,
        }
    }

    fn preferred() -> Vec<String> {
        vec!["HU".to_string(), "US".to_string()]
    }

    #[tokio::test]
    async fn test_enriches_movie_and_tv_items() {
        let mut mock = MockMetadataProvider::new();
        mock.expect_movie_certifications()
            .withf(|id| *id == 1)
            .returning(|_| {
                vec![CountryCertifications::single(
                    "HU",
                    Some("16".to_string()),
                )]
            });
        mock.expect_tv_certifications()
            .withf(|id| *id == 2)
            .returning(|_| {
                vec![CountryCertifications::single(
                    "US",
                    Some("TV-14".to_string()),
                )]
            });

        let provider: Arc<dyn MetadataProvider> = Arc::new(mock);
        let mut page = page_of(&[(1, "movie"), (2, "tv")]);
        enrich_page(&provider, &mut page, &preferred(), 15).await;

        assert_eq!(page.results[0].certification.as_deref(), Some("16"));
        assert_eq!(page.results[0].rating_tier, Some(RatingTier::SixteenPlus));
        assert_eq!(page.results[1].certification.as_deref(), Some("TV-14"));
        assert_eq!(page.results[1].rating_tier, Some(RatingTier::ThirteenPlus));
    }

    #[tokio::test]
    async fn test_lookup_bounded_to_prefix() {
        let mut mock = MockMetadataProvider::new();
        // Exactly one lookup allowed: the prefix is 1 item long.
        mock.expect_movie_certifications()
            .times(1)
            .returning(|_| vec![CountryCertifications::single("HU", Some("12".to_string()))]);

        let provider: Arc<dyn MetadataProvider> = Arc::new(mock);
        let mut page = page_of(&[(1, "movie"), (2, "movie"), (3, "movie")]);
        enrich_page(&provider, &mut page, &preferred(), 1).await;

        assert_eq!(page.results[0].rating_tier, Some(RatingTier::TenPlus));
        assert_eq!(page.results[1].certification, None);
        assert_eq!(page.results[1].rating_tier, None);
        assert_eq!(page.results[2].rating_tier, None);
    }

    #[tokio::test]
    async fn test_empty_records_leave_item_unannotated() {
        let mut mock = MockMetadataProvider::new();
        mock.expect_tv_certifications().returning(|_| Vec::new());

        let provider: Arc<dyn MetadataProvider> = Arc::new(mock);
        let mut page = page_of(&[(7, "tv")]);
        enrich_page(&provider, &mut page, &preferred(), 15).await;

        assert_eq!(page.results[0].certification, None);
        assert_eq!(page.results[0].rating_tier, None);
    }

    #[test]
    fn test_lookup_outcome_composes_resolver_and_normalizer() {
        let records = vec![
            CountryCertifications::single("HU", Some(String::new())),
            CountryCertifications::single("US", Some("PG-13".to_string())),
        ];
        let (raw, tier) = lookup_outcome(&records, &preferred());
        assert_eq!(raw.as_deref(), Some("PG-13"));
        assert_eq!(tier, Some(RatingTier::ThirteenPlus));
    }
}
