//! Time handling utilities for archive queries.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EveError, EveResult};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y/%m/%dT%H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

/// Parse a loosely formatted UTC timestamp.
///
/// Accepts RFC 3339, ISO 8601 without offset (assumed UTC), the slash forms
/// used throughout the archive (`2012/4/21`, `2018/01/01 14:00`) and bare
/// dates, which resolve to midnight.
pub fn parse_time(s: &str) -> EveResult<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = s.trim_end_matches('Z');
    for fmt in DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(naive, fmt) {
            return Ok(Utc.from_utc_datetime(&ndt));
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(naive, fmt) {
            return Ok(midnight(date));
        }
    }

    Err(EveError::InvalidTime(s.to_string()))
}

/// Midnight UTC at the start of `date`.
pub fn midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

/// A closed time interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeRange")]
pub struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawTimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawTimeRange> for TimeRange {
    type Error = EveError;

    fn try_from(raw: RawTimeRange) -> Result<Self, Self::Error> {
        TimeRange::new(raw.start, raw.end)
    }
}

impl TimeRange {
    /// Create a range, rejecting `start > end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> EveResult<Self> {
        if start > end {
            return Err(EveError::InvalidTimeRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parse both bounds with [`parse_time`].
    pub fn parse(start: &str, end: &str) -> EveResult<Self> {
        Self::new(parse_time(start)?, parse_time(end)?)
    }

    /// Range starting at `start` and lasting `length`.
    ///
    /// Negative lengths collapse to an instant; the end saturates at the
    /// latest representable instant.
    pub fn spanning(start: DateTime<Utc>, length: Duration) -> Self {
        let end = start
            .checked_add_signed(length.max(Duration::zero()))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self { start, end }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn contains(&self, dt: &DateTime<Utc>) -> bool {
        dt >= &self.start && dt <= &self.end
    }

    /// Whether the two closed intervals share at least one instant.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Copy of this range with a different start; the end is kept.
    ///
    /// Fails if the new start lies after the end.
    pub fn with_start(&self, start: DateTime<Utc>) -> EveResult<Self> {
        Self::new(start, self.end)
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%Y-%m-%d %H:%M:%S"),
            self.end.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_time("2024-01-15T12:00:00Z").unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.month(), 1);
        assert_eq!(dt.day(), 15);
        assert_eq!(dt.hour(), 12);
    }

    #[test]
    fn test_parse_slash_forms() {
        let dt = parse_time("2012/4/21").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2012, 4, 21, 0, 0, 0).unwrap());

        let dt = parse_time("2018/01/01 14:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2018, 1, 1, 14, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(parse_time("yesterday"), Err(EveError::InvalidTime(_))));
    }

    #[test]
    fn test_range_rejects_reversed_bounds() {
        let result = TimeRange::parse("2018/04/21", "2018/04/20");
        assert!(matches!(result, Err(EveError::InvalidTimeRange { .. })));
    }

    #[test]
    fn test_spanning_and_display() {
        let start = Utc.with_ymd_and_hms(2018, 1, 1, 14, 0, 0).unwrap();
        let range = TimeRange::spanning(start, Duration::hours(1));
        assert_eq!(range.duration(), Duration::hours(1));
        assert_eq!(range.to_string(), "2018-01-01 14:00:00 - 2018-01-01 15:00:00");
    }

    #[test]
    fn test_spanning_saturates_at_latest_instant() {
        let start = DateTime::<Utc>::MAX_UTC - Duration::hours(1);
        let range = TimeRange::spanning(start, Duration::days(1));
        assert_eq!(range.start(), start);
        assert_eq!(range.end(), DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_contains_is_closed() {
        let range = TimeRange::parse("2012/5/5", "2012/5/6").unwrap();
        assert!(range.contains(&range.start()));
        assert!(range.contains(&range.end()));
        assert!(!range.contains(&(range.end() + Duration::seconds(1))));
    }
}
