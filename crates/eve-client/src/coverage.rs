//! Coverage records and search result rows.

use eve_common::TimeRange;
use serde::{Deserialize, Serialize};

use crate::variant::ProductInfo;

/// The interval a single remote file is asserted to cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCoverage {
    pub url: String,
    pub range: TimeRange,
}

/// One row of a variant search: a coverage record plus product metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRow {
    pub variant: String,
    pub url: String,
    pub range: TimeRange,
    pub source: String,
    pub provider: String,
    pub instrument: String,
    pub physobs: String,
    pub level: String,
    /// Not recorded for EVE products.
    pub wavelength: Option<f64>,
}

impl SearchRow {
    pub fn new(variant: &str, info: &ProductInfo, coverage: FileCoverage) -> Self {
        Self {
            variant: variant.to_string(),
            url: coverage.url,
            range: coverage.range,
            source: info.source.clone(),
            provider: info.provider.clone(),
            instrument: info.instrument.clone(),
            physobs: info.physobs.clone(),
            level: info.level.clone(),
            wavelength: None,
        }
    }
}

/// Smallest range containing every row, if any.
pub fn overall_range(rows: &[SearchRow]) -> Option<TimeRange> {
    let start = rows.iter().map(|r| r.range.start()).min()?;
    let end = rows.iter().map(|r| r.range.end()).max()?;
    TimeRange::new(start, end).ok()
}
