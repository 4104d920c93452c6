//! Time-indexed tabular data.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use eve_common::TimeRange;
use serde::Serialize;

use crate::units::Unit;

/// A parsed EVE time series.
///
/// `values` is row-major: `values[row][col]` belongs to `index[row]` and
/// `columns[col]`. Missing samples are NaN.
#[derive(Debug, Clone, Default)]
pub struct TimeSeries {
    pub index: Vec<DateTime<Utc>>,
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
    pub meta: BTreeMap<String, String>,
    pub units: BTreeMap<String, Unit>,
    pub filename: Option<String>,
}

impl TimeSeries {
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All samples of column `name`, in index order.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.column_index(name)?;
        Some(self.values.iter().map(|row| row[idx]).collect())
    }

    pub fn unit(&self, name: &str) -> Option<Unit> {
        self.units.get(name).copied()
    }

    /// First to last index timestamp.
    pub fn time_range(&self) -> Option<TimeRange> {
        let start = self.index.iter().min()?;
        let end = self.index.iter().max()?;
        TimeRange::new(*start, *end).ok()
    }

    pub fn summary(&self) -> SeriesSummary {
        let columns = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let present: Vec<f64> = self
                    .values
                    .iter()
                    .map(|row| row[idx])
                    .filter(|v| !v.is_nan())
                    .collect();
                ColumnSummary {
                    name: name.clone(),
                    unit: self.unit(name).map(|u| u.to_string()),
                    missing: self.len() - present.len(),
                    min: present.iter().copied().reduce(f64::min),
                    max: present.iter().copied().reduce(f64::max),
                }
            })
            .collect();

        SeriesSummary {
            filename: self.filename.clone(),
            rows: self.len(),
            range: self.time_range(),
            columns,
            meta: self.meta.clone(),
        }
    }
}

/// Per-column statistics for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub unit: Option<String>,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Overview of a parsed series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub filename: Option<String>,
    pub rows: usize,
    pub range: Option<TimeRange>,
    pub columns: Vec<ColumnSummary>,
    pub meta: BTreeMap<String, String>,
}
