//! Plain-text rendering of registry, search and parse results.

use std::fmt::Write;

use eve_client::{overall_range, ClientVariant, SearchRow};
use eve_parser::SeriesSummary;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One line per variant: id, level, granularity and URL pattern.
pub fn variants_table<'a>(variants: impl IntoIterator<Item = &'a ClientVariant>) -> String {
    let mut out = String::new();
    for variant in variants {
        let _ = writeln!(
            out,
            "{:<20} {:<10} {:<8} {}",
            variant.id(),
            variant.info().level,
            variant.granularity().to_string(),
            variant.pattern()
        );
    }
    out
}

/// Search rows with their coverage, followed by a total line.
pub fn rows_table(rows: &[SearchRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(
            out,
            "{:<20} {}  {}  {}",
            row.variant,
            row.range.start().format(TIME_FORMAT),
            row.range.end().format(TIME_FORMAT),
            row.url
        );
    }
    match overall_range(rows) {
        Some(range) => {
            let _ = writeln!(out, "{} file(s) covering {}", rows.len(), range);
        }
        None => out.push_str("No files found\n"),
    }
    out
}

/// Human-readable overview of a parsed series.
pub fn summary_text(summary: &SeriesSummary) -> String {
    let mut out = String::new();
    if let Some(name) = &summary.filename {
        let _ = writeln!(out, "File:    {}", name);
    }
    let _ = writeln!(out, "Rows:    {}", summary.rows);
    if let Some(range) = &summary.range {
        let _ = writeln!(out, "Range:   {}", range);
    }
    for (key, value) in &summary.meta {
        let _ = writeln!(out, "Meta:    {}: {}", key, value);
    }

    let bound = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{:.4e}", v));
    for column in &summary.columns {
        let _ = writeln!(
            out,
            "  {:<14} {:<14} missing={:<5} min={:<12} max={}",
            column.name,
            column.unit.as_deref().unwrap_or(""),
            column.missing,
            bound(column.min),
            bound(column.max)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use eve_client::catalog;
    use eve_common::{QueryTerm, TimeRange};

    #[test]
    fn test_variants_table_lists_ids() {
        let variants = catalog::eve_variants().unwrap();
        let table = variants_table(&variants);
        assert_eq!(table.lines().count(), 5);
        assert!(table.contains("eve-level2b"));
        assert!(table.contains("hour"));
    }

    #[test]
    fn test_rows_table() {
        let client = catalog::level_0cs().unwrap();
        let today = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let terms = [QueryTerm::time(TimeRange::parse("2012/5/5", "2012/5/6").unwrap())];
        let rows = client.search_at(&terms, today).unwrap();

        let table = rows_table(&rows);
        assert!(table.contains("20120505_EVE_L0CS_DIODES_1m.txt"));
        assert!(table.ends_with("2 file(s) covering 2012-05-05 00:00:00 - 2012-05-07 00:00:00\n"));
        assert_eq!(rows_table(&[]), "No files found\n");
    }
}
