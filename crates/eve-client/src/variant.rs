//! Client variants: one parameterized record per (instrument, level) product.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, Utc};
use eve_common::query::time_term;
use eve_common::{EveError, EveResult, QueryTerm, TimeRange};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url_scraper::{filelist, DirectoryListing, FieldValue, UrlPattern};

use crate::coverage::{FileCoverage, SearchRow};
use crate::granularity::Granularity;
use crate::predicate::QueryPredicate;

/// Descriptive metadata attached to every search row of a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_instrument")]
    pub instrument: String,
    #[serde(default = "default_physobs")]
    pub physobs: String,
    pub level: String,
}

fn default_source() -> String {
    "SDO".to_string()
}

fn default_provider() -> String {
    "LASP".to_string()
}

fn default_instrument() -> String {
    "eve".to_string()
}

fn default_physobs() -> String {
    "irradiance".to_string()
}

impl ProductInfo {
    /// EVE product metadata for the given level label (`L0CS`, `L2B`, ...).
    pub fn eve(level: &str) -> Self {
        Self {
            source: default_source(),
            provider: default_provider(),
            instrument: default_instrument(),
            physobs: default_physobs(),
            level: level.to_string(),
        }
    }
}

/// Everything needed to build a [`ClientVariant`].
#[derive(Debug, Clone)]
pub struct VariantSpec {
    pub id: String,
    pub info: ProductInfo,
    /// Archive host prefix, joined to `path` as-is.
    pub host: String,
    /// Date-templated product path.
    pub path: String,
    pub fields: BTreeMap<String, FieldValue>,
    pub granularity: Granularity,
    pub predicate: QueryPredicate,
}

/// A client for one archive product.
#[derive(Debug, Clone)]
pub struct ClientVariant {
    id: String,
    info: ProductInfo,
    pattern: UrlPattern,
    granularity: Granularity,
    predicate: QueryPredicate,
}

impl ClientVariant {
    /// Build a variant, binding its URL pattern.
    ///
    /// Fails when the product path is empty, a pattern field is unbound, or
    /// the pattern's date tokens do not fit the granularity.
    pub fn new(spec: VariantSpec) -> EveResult<Self> {
        if spec.path.trim().is_empty() {
            return Err(EveError::MissingProductPath(spec.id));
        }

        let template = format!("{}{}", spec.host, spec.path);
        let pattern = UrlPattern::new(&template, &spec.fields)?;

        if !spec.granularity.fits(pattern.resolution()) {
            return Err(EveError::GranularityMismatch {
                pattern: pattern.to_string(),
                granularity: spec.granularity.to_string(),
            });
        }

        debug!(variant = %spec.id, pattern = %pattern, granularity = %spec.granularity, "Built client variant");

        Ok(Self {
            id: spec.id,
            info: spec.info,
            pattern,
            granularity: spec.granularity,
            predicate: spec.predicate,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn info(&self) -> &ProductInfo {
        &self.info
    }

    pub fn pattern(&self) -> &UrlPattern {
        &self.pattern
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn predicate(&self) -> &QueryPredicate {
        &self.predicate
    }

    /// Whether this variant services a query made of `terms`.
    pub fn can_handle(&self, terms: &[QueryTerm]) -> bool {
        self.predicate.can_handle(terms)
    }

    fn step(&self) -> Duration {
        self.granularity.step().unwrap_or_else(Duration::zero)
    }

    /// Candidate URLs for `range`, ascending, one per partition.
    pub fn urls_for_at(&self, range: &TimeRange, today: NaiveDate) -> EveResult<Vec<String>> {
        let normalized = self.granularity.normalize_at(range, today)?;
        Ok(self.pattern.enumerate(&normalized, self.step()))
    }

    pub fn urls_for(&self, range: &TimeRange) -> EveResult<Vec<String>> {
        self.urls_for_at(range, Utc::now().date_naive())
    }

    /// Files actually present in `listing` for `range`.
    pub fn list_files_at<L: DirectoryListing + ?Sized>(
        &self,
        listing: &L,
        range: &TimeRange,
        today: NaiveDate,
    ) -> EveResult<Vec<String>> {
        let normalized = self.granularity.normalize_at(range, today)?;
        filelist(&self.pattern, listing, &normalized, self.step())
    }

    /// The interval the file at `url` covers.
    pub fn time_for_url_at(&self, url: &str, today: NaiveDate) -> EveResult<TimeRange> {
        let date = self.pattern.extract_date(url)?;
        match (self.granularity, date) {
            (Granularity::Mission, _) => Ok(Granularity::full_history(today)),
            (granularity, Some(date)) => Ok(granularity.span_at(date, today)),
            (_, None) => Err(EveError::pattern_mismatch(self.pattern.as_str(), url)),
        }
    }

    pub fn time_for_url(&self, url: &str) -> EveResult<TimeRange> {
        self.time_for_url_at(url, Utc::now().date_naive())
    }

    /// Coverage records for `urls`, in input order.
    pub fn coverage_at<S: AsRef<str>>(
        &self,
        urls: &[S],
        today: NaiveDate,
    ) -> EveResult<Vec<FileCoverage>> {
        urls.iter()
            .map(|url| {
                let url = url.as_ref();
                Ok(FileCoverage {
                    url: url.to_string(),
                    range: self.time_for_url_at(url, today)?,
                })
            })
            .collect()
    }

    pub fn coverage<S: AsRef<str>>(&self, urls: &[S]) -> EveResult<Vec<FileCoverage>> {
        self.coverage_at(urls, Utc::now().date_naive())
    }

    /// Enumerate and reconstruct the files for the query's time term.
    #[instrument(skip(self, terms), fields(variant = %self.id))]
    pub fn search_at(&self, terms: &[QueryTerm], today: NaiveDate) -> EveResult<Vec<SearchRow>> {
        let range = time_term(terms).ok_or(EveError::MissingTimeTerm)?;
        let urls = self.urls_for_at(range, today)?;
        let rows: Vec<SearchRow> = self
            .coverage_at(&urls, today)?
            .into_iter()
            .map(|coverage| SearchRow::new(&self.id, &self.info, coverage))
            .collect();

        debug!(count = rows.len(), range = %range, "Search complete");
        Ok(rows)
    }

    pub fn search(&self, terms: &[QueryTerm]) -> EveResult<Vec<SearchRow>> {
        self.search_at(terms, Utc::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::{LevelMatch, MatchMode};

    fn spec(path: &str, granularity: Granularity) -> VariantSpec {
        VariantSpec {
            id: "test".into(),
            info: ProductInfo::eve("T"),
            host: "http://host/".into(),
            path: path.into(),
            fields: BTreeMap::from([("version".to_string(), FieldValue::from(6))]),
            granularity,
            predicate: QueryPredicate {
                instrument: "eve".into(),
                level: LevelMatch::Integer(9),
                time: None,
                mode: MatchMode::DistinctKinds,
            },
        }
    }

    #[test]
    fn test_missing_path_fails_at_construction() {
        let err = ClientVariant::new(spec("  ", Granularity::Day)).unwrap_err();
        assert!(matches!(err, EveError::MissingProductPath(id) if id == "test"));
    }

    #[test]
    fn test_unbound_field_fails_at_construction() {
        let err = ClientVariant::new(spec("%Y/{revision:02d}.fit", Granularity::Day)).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_granularity_mismatch() {
        assert!(matches!(
            ClientVariant::new(spec("%Y/%j_v{version}.fit", Granularity::Hour)),
            Err(EveError::GranularityMismatch { .. })
        ));
        assert!(matches!(
            ClientVariant::new(spec("%Y/latest.fit", Granularity::Mission)),
            Err(EveError::GranularityMismatch { .. })
        ));
    }

    #[test]
    fn test_search_requires_time_term() {
        let variant = ClientVariant::new(spec("%Y/%j_v{version:03d}.fit", Granularity::Day)).unwrap();
        let err = variant.search(&[QueryTerm::instrument("eve")]).unwrap_err();
        assert!(matches!(err, EveError::MissingTimeTerm));
    }

    #[test]
    fn test_dateless_url_on_dated_variant_is_mismatch() {
        let variant = ClientVariant::new(spec("%Y/%j_v{version:03d}.fit", Granularity::Day)).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(variant.time_for_url_at("http://host/2018/110_v006.fit", today).is_ok());
        assert!(matches!(
            variant.time_for_url_at("http://host/2018/110_v6.fit", today),
            Err(EveError::PatternMismatch { .. })
        ));
    }
}
