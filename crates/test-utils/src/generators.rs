//! Generators for synthetic EVE files.
//!
//! Values follow predictable patterns so tests can check parsed output
//! without a reference file.

use crate::fixtures::level0cs::COLUMNS;

/// Value written for row `row`, data column `col` (0-based, index excluded).
///
/// `row * 100 + col`, which keeps every cell distinct.
pub fn level0cs_value(row: usize, col: usize) -> f64 {
    (row * 100 + col) as f64
}

/// Creates a Level 0CS file with `minutes` one-minute rows starting at 00:00.
///
/// Every `missing_every`-th row (when non-zero) has its first data column
/// replaced by the missing sentinel `-1`.
///
/// # Example
///
/// ```
/// use test_utils::create_level0cs_text;
///
/// let text = create_level0cs_text(2012, 112, 4, 21, 3, 0);
/// assert!(text.contains("2012 112 04 21"));
/// assert!(text.lines().last().unwrap().starts_with("0002"));
/// ```
pub fn create_level0cs_text(
    year: i32,
    doy: u32,
    month: u32,
    day: u32,
    minutes: usize,
    missing_every: usize,
) -> String {
    let mut out = String::new();
    out.push_str("; Title: synthetic EVE Level 0CS\n");
    out.push_str("; Missing data: -1\n");
    out.push_str("; Column descriptions:\n");
    for name in COLUMNS {
        out.push_str(&format!("; {}: generated\n", name));
    }
    out.push_str("; Format:\n");
    out.push_str(&format!("{} {:03} {:02} {:02}\n", year, doy, month, day));

    for row in 0..minutes {
        let hhmm = format!("{:02}{:02}", row / 60, row % 60);
        out.push_str(&hhmm);
        for col in 0..COLUMNS.len() - 1 {
            let value = if missing_every > 0 && row % missing_every == 0 && col == 0 {
                -1.0
            } else {
                level0cs_value(row, col)
            };
            out.push_str(&format!(" {}", value));
        }
        out.push('\n');
    }
    out
}

/// Creates an averages CSV with `days` daily rows starting at `start` (`YYYY-MM-DD`).
pub fn create_averages_csv(start: chrono::NaiveDate, days: usize, columns: &[&str]) -> String {
    let mut out = String::from("Date");
    for name in columns {
        out.push(',');
        out.push_str(name);
    }
    out.push('\n');

    for row in 0..days {
        let date = start + chrono::Duration::days(row as i64);
        out.push_str(&date.format("%Y-%m-%d").to_string());
        for col in 0..columns.len() {
            out.push_str(&format!(",{}", level0cs_value(row, col)));
        }
        out.push('\n');
    }
    out
}
