//! Content certification resolution and normalization.
//!
//! TMDB reports certifications per country, in formats that vary wildly
//! across jurisdictions and media types ("PG-13", "16", "TV-MA", "K-12").
//! This module picks one representative raw certification for a title by
//! walking a preferred-country list, and maps any raw certification onto a
//! Netflix-style six-tier audience scale for display.

use serde::{Deserialize, Serialize};

/// One certification entry for a country. For movies this corresponds to a
/// release-date entry; a TV content rating degenerates to a single entry
/// with no date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificationEntry {
    pub certification: Option<String>,
    /// Carried through for display; never used for selection priority.
    pub release_date: Option<String>,
}

impl CertificationEntry {
    pub fn new(certification: Option<String>, release_date: Option<String>) -> Self {
        Self {
            certification,
            release_date,
        }
    }
}

/// Per-country certification data for one title, entries in upstream order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryCertifications {
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
    pub entries: Vec<CertificationEntry>,
}

impl CountryCertifications {
    pub fn new(country: impl Into<String>, entries: Vec<CertificationEntry>) -> Self {
        Self {
            country: country.into(),
            entries,
        }
    }

    /// A country record carrying a single rating string (the TV shape).
    pub fn single(country: impl Into<String>, rating: Option<String>) -> Self {
        Self::new(country, vec![CertificationEntry::new(rating, None)])
    }

    /// First non-empty certification in this country's entries.
    fn first_usable(&self) -> Option<ResolvedCertification<'_>> {
        self.entries.iter().find_map(|entry| {
            match entry.certification.as_deref() {
                // Empty strings mean the same thing as absent: skip.
                Some(value) if !value.is_empty() => Some(ResolvedCertification {
                    value,
                    release_date: entry.release_date.as_deref(),
                }),
                _ => None,
            }
        })
    }
}

/// A certification selected for display, borrowed from the source records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCertification<'a> {
    pub value: &'a str,
    pub release_date: Option<&'a str>,
}

/// Selects one raw certification by walking `preferred` country codes in
/// order, falling back to the first usable value anywhere in `records`.
///
/// Country codes match exactly (case-sensitive); when a code appears more
/// than once upstream, the first record in scan order wins. Returns `None`
/// when no record carries a non-empty certification. Never fails: callers
/// substitute an empty record set when the upstream fetch itself failed.
pub fn resolve<'a>(
    records: &'a [CountryCertifications],
    preferred: &[String],
) -> Option<ResolvedCertification<'a>> {
    for country in preferred {
        let found = records
            .iter()
            .filter(|record| record.country == *country)
            .find_map(CountryCertifications::first_usable);
        if found.is_some() {
            return found;
        }
    }

    // No preferred country had a usable value; take whatever is there.
    records
        .iter()
        .find_map(CountryCertifications::first_usable)
}

/// Netflix-style audience tier, ordered by implied minimum age.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RatingTier {
    #[serde(rename = "ALL")]
    All,
    #[serde(rename = "7+")]
    SevenPlus,
    #[serde(rename = "10+")]
    TenPlus,
    #[serde(rename = "13+")]
    ThirteenPlus,
    #[serde(rename = "16+")]
    SixteenPlus,
    #[serde(rename = "18+")]
    EighteenPlus,
}

/// Raw strings that mean "no restriction" regardless of country. Some
/// countries encode the lowest tier as a small integer, hence the digits.
const ALL_AUDIENCE_ALIASES: &[&str] = &[
    "g",
    "u",
    "all",
    "nr",
    "unrated",
    "general",
    "universal",
    "0",
    "1",
    "2",
    "3",
    "4",
    "5",
    "6",
];

impl RatingTier {
    /// Maps a raw certification string onto the six-tier scale.
    ///
    /// Empty or whitespace-only input yields `None`. Known no-restriction
    /// aliases (case-insensitive) and strings with no digits at all map to
    /// `All`; unparseable non-restrictive strings deliberately default to
    /// the least restrictive tier rather than to unknown. Otherwise the
    /// largest run of digits is taken as the age ("K-12" rates by 12, the
    /// smaller number being a category code rather than an age).
    pub fn from_raw(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let lower = trimmed.to_lowercase();
        if ALL_AUDIENCE_ALIASES.contains(&lower.as_str()) {
            return Some(RatingTier::All);
        }

        Some(match max_digit_run(trimmed) {
            None => RatingTier::All,
            Some(age) => RatingTier::from_age(age),
        })
    }

    /// Inclusive upper bounds per tier.
    fn from_age(age: u64) -> Self {
        match age {
            0..=6 => RatingTier::All,
            7..=9 => RatingTier::SevenPlus,
            10..=12 => RatingTier::TenPlus,
            13..=15 => RatingTier::ThirteenPlus,
            16..=17 => RatingTier::SixteenPlus,
            _ => RatingTier::EighteenPlus,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RatingTier::All => "ALL",
            RatingTier::SevenPlus => "7+",
            RatingTier::TenPlus => "10+",
            RatingTier::ThirteenPlus => "13+",
            RatingTier::SixteenPlus => "16+",
            RatingTier::EighteenPlus => "18+",
        }
    }
}

impl std::fmt::Display for RatingTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Largest integer among all maximal decimal digit runs in `s`, or `None`
/// when the string contains no digits.
fn max_digit_run(s: &str) -> Option<u64> {
    s.split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        // Absurdly long runs saturate rather than vanish.
        .map(|run| run.parse::<u64>().unwrap_or(u64::MAX))
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(data: &[(&str, &[&str])]) -> Vec<CountryCertifications> {
        data.iter()
            .map(|(country, certs)| {
                CountryCertifications::new(
                    *country,
                    certs
                        .iter()
                        .map(|c| CertificationEntry::new(Some(c.to_string()), None))
                        .collect(),
                )
            })
            .collect()
    }

    fn preferred(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_resolve_preferred_country_first() {
        let recs = records(&[("US", &["PG-13"]), ("HU", &["16"])]);
        let resolved = resolve(&recs, &preferred(&["HU", "US"])).unwrap();
        assert_eq!(resolved.value, "16");
    }

    #[test]
    fn test_resolve_skips_empty_and_falls_through() {
        // HU is present but empty, so the next preferred country wins.
        let recs = records(&[("US", &["TV-14"]), ("HU", &[""])]);
        let resolved = resolve(&recs, &preferred(&["HU", "US"])).unwrap();
        assert_eq!(resolved.value, "TV-14");
    }

    #[test]
    fn test_resolve_first_usable_entry_within_country() {
        let recs = records(&[("HU", &["", "12", "16"])]);
        let resolved = resolve(&recs, &preferred(&["HU"])).unwrap();
        assert_eq!(resolved.value, "12");
    }

    #[test]
    fn test_resolve_fallback_scan_unrelated_country() {
        let recs = records(&[("JP", &["R15+"])]);
        let resolved = resolve(&recs, &preferred(&["HU", "US"])).unwrap();
        assert_eq!(resolved.value, "R15+");
    }

    #[test]
    fn test_resolve_all_empty_is_none() {
        let recs = records(&[("HU", &[""]), ("US", &[""])]);
        assert_eq!(resolve(&recs, &preferred(&["HU", "US"])), None);
    }

    #[test]
    fn test_resolve_empty_records_is_none() {
        assert_eq!(resolve(&[], &preferred(&["HU"])), None);
    }

    #[test]
    fn test_resolve_duplicate_country_first_match_wins() {
        let recs = records(&[("US", &[""]), ("US", &["R"])]);
        let resolved = resolve(&recs, &preferred(&["US"])).unwrap();
        assert_eq!(resolved.value, "R");
    }

    #[test]
    fn test_resolve_country_match_is_case_sensitive() {
        let recs = records(&[("us", &["R"])]);
        // "US" does not match "us" in the preferred walk, but the fallback
        // scan still picks the value up.
        let resolved = resolve(&recs, &preferred(&["US"])).unwrap();
        assert_eq!(resolved.value, "R");
    }

    #[test]
    fn test_resolve_carries_release_date() {
        let recs = vec![CountryCertifications::new(
            "HU",
            vec![CertificationEntry::new(
                Some("16".to_string()),
                Some("2024-03-01T00:00:00.000Z".to_string()),
            )],
        )];
        let resolved = resolve(&recs, &preferred(&["HU"])).unwrap();
        assert_eq!(resolved.release_date, Some("2024-03-01T00:00:00.000Z"));
    }

    #[test]
    fn test_tier_absent_for_empty_input() {
        assert_eq!(RatingTier::from_raw(""), None);
        assert_eq!(RatingTier::from_raw("   "), None);
    }

    #[test]
    fn test_tier_aliases_case_insensitive() {
        for raw in ["G", "g", "ALL", "u", "NR", "Unrated", "universal", "General"] {
            assert_eq!(RatingTier::from_raw(raw), Some(RatingTier::All), "{raw}");
        }
    }

    #[test]
    fn test_tier_small_integers_are_all_audiences() {
        for raw in ["0", "3", "6"] {
            assert_eq!(RatingTier::from_raw(raw), Some(RatingTier::All), "{raw}");
        }
    }

    #[test]
    fn test_tier_no_digits_defaults_to_all() {
        assert_eq!(RatingTier::from_raw("TV-MA"), Some(RatingTier::All));
        assert_eq!(RatingTier::from_raw("Btl"), Some(RatingTier::All));
    }

    #[test]
    fn test_tier_age_boundaries() {
        let cases = [
            ("6", RatingTier::All),
            ("7", RatingTier::SevenPlus),
            ("9", RatingTier::SevenPlus),
            ("10", RatingTier::TenPlus),
            ("12", RatingTier::TenPlus),
            ("13", RatingTier::ThirteenPlus),
            ("15", RatingTier::ThirteenPlus),
            ("16", RatingTier::SixteenPlus),
            ("17", RatingTier::SixteenPlus),
            ("18", RatingTier::EighteenPlus),
            ("21", RatingTier::EighteenPlus),
        ];
        for (raw, expected) in cases {
            assert_eq!(RatingTier::from_raw(raw), Some(expected), "{raw}");
        }
    }

    #[test]
    fn test_tier_takes_max_digit_run() {
        assert_eq!(RatingTier::from_raw("K-12"), Some(RatingTier::TenPlus));
        assert_eq!(
            RatingTier::from_raw("TV-MA-17"),
            Some(RatingTier::SixteenPlus)
        );
        assert_eq!(RatingTier::from_raw("PG-13"), Some(RatingTier::ThirteenPlus));
    }

    #[test]
    fn test_tier_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(RatingTier::from_raw("PG-13"), Some(RatingTier::ThirteenPlus));
        }
    }

    #[test]
    fn test_tier_ordering_by_minimum_age() {
        assert!(RatingTier::All < RatingTier::SevenPlus);
        assert!(RatingTier::SevenPlus < RatingTier::TenPlus);
        assert!(RatingTier::TenPlus < RatingTier::ThirteenPlus);
        assert!(RatingTier::ThirteenPlus < RatingTier::SixteenPlus);
        assert!(RatingTier::SixteenPlus < RatingTier::EighteenPlus);
    }

    #[test]
    fn test_tier_serializes_as_label() {
        assert_eq!(
            serde_json::to_string(&RatingTier::TenPlus).unwrap(),
            "\"10+\""
        );
        assert_eq!(serde_json::to_string(&RatingTier::All).unwrap(), "\"ALL\"");
    }
}
