//! File granularity: how much time one remote file covers.
//!
//! Normalization snaps a requested start down to the partition boundary so
//! the file covering the true start is included. Reconstruction maps a file's
//! encoded date back to the interval it covers.

use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use eve_common::time::midnight;
use eve_common::{EveResult, TimeRange};
use serde::{Deserialize, Serialize};
use url_scraper::Resolution;

pub(crate) const fn calendar_date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid calendar date"),
    }
}

/// Sentinel start of the full-mission product, which encodes no date.
pub const FULL_HISTORY_START: NaiveDate = calendar_date(1900, 1, 1);

/// Time span covered by one remote file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One file per calendar day.
    Day,
    /// One file per hour.
    Hour,
    /// A single file covering the whole mission.
    Mission,
}

impl Granularity {
    /// Partition length, `None` for the single mission file.
    pub fn step(&self) -> Option<Duration> {
        match self {
            Granularity::Day => Some(Duration::days(1)),
            Granularity::Hour => Some(Duration::hours(1)),
            Granularity::Mission => None,
        }
    }

    /// The fixed interval the mission file is asserted to cover.
    pub fn full_history(today: NaiveDate) -> TimeRange {
        let start = midnight(FULL_HISTORY_START);
        TimeRange::spanning(start, midnight(today) - start)
    }

    /// Round the start of `range` down to the partition boundary.
    ///
    /// The end is left untouched. The mission granularity ignores the input
    /// and returns [`Granularity::full_history`].
    pub fn normalize_at(&self, range: &TimeRange, today: NaiveDate) -> EveResult<TimeRange> {
        match self {
            Granularity::Day => range.with_start(midnight(range.start().date_naive())),
            Granularity::Hour => {
                let start = range.start();
                let hour = start - Duration::seconds(i64::from(start.minute() * 60 + start.second()))
                    - Duration::nanoseconds(i64::from(start.nanosecond()));
                range.with_start(hour)
            }
            Granularity::Mission => Ok(Self::full_history(today)),
        }
    }

    /// [`Granularity::normalize_at`] with today's UTC date.
    pub fn normalize(&self, range: &TimeRange) -> EveResult<TimeRange> {
        self.normalize_at(range, Utc::now().date_naive())
    }

    /// Interval covered by the file whose encoded date is `date`.
    pub fn span_at(&self, date: DateTime<Utc>, today: NaiveDate) -> TimeRange {
        match self.step() {
            Some(step) => TimeRange::spanning(date, step),
            None => Self::full_history(today),
        }
    }

    /// Whether a pattern of the given resolution can back this granularity.
    ///
    /// Day needs a day (or finer) token, Hour an hour token and Mission no
    /// date token at all.
    pub fn fits(&self, resolution: Option<Resolution>) -> bool {
        match (self, resolution) {
            (Granularity::Day, Some(r)) => r <= Resolution::Day,
            (Granularity::Hour, Some(r)) => r <= Resolution::Hour,
            (Granularity::Mission, None) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Granularity::Day => "day",
            Granularity::Hour => "hour",
            Granularity::Mission => "mission",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_day_snaps_to_midnight() {
        let range = TimeRange::parse("2012/4/21 14:30", "2012/4/22 16:00").unwrap();
        let normalized = Granularity::Day.normalize_at(&range, today()).unwrap();
        assert_eq!(
            normalized.start(),
            Utc.with_ymd_and_hms(2012, 4, 21, 0, 0, 0).unwrap()
        );
        assert_eq!(normalized.end(), range.end());
    }

    #[test]
    fn test_hour_snaps_to_top_of_hour() {
        let range = TimeRange::parse("2018-01-01T14:30:15.250Z", "2018-01-01T16:00:00Z").unwrap();
        let normalized = Granularity::Hour.normalize_at(&range, today()).unwrap();
        assert_eq!(
            normalized.start(),
            Utc.with_ymd_and_hms(2018, 1, 1, 14, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_aligned_start_unchanged() {
        let range = TimeRange::parse("2018/01/01 14:00", "2018/01/01 15:00").unwrap();
        assert_eq!(Granularity::Hour.normalize_at(&range, today()).unwrap(), range);
        assert_eq!(Granularity::Day.normalize_at(&range, today()).unwrap().start(),
            Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_mission_ignores_input() {
        let range = TimeRange::parse("2018/04/20", "2018/04/20").unwrap();
        let normalized = Granularity::Mission.normalize_at(&range, today()).unwrap();
        assert_eq!(normalized.start(), Utc.with_ymd_and_hms(1900, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(normalized.end(), Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_fits_resolution() {
        assert!(Granularity::Day.fits(Some(Resolution::Day)));
        assert!(Granularity::Day.fits(Some(Resolution::Hour)));
        assert!(!Granularity::Day.fits(Some(Resolution::Year)));
        assert!(!Granularity::Hour.fits(Some(Resolution::Day)));
        assert!(Granularity::Mission.fits(None));
        assert!(!Granularity::Mission.fits(Some(Resolution::Day)));
    }

    #[test]
    fn test_serde_names() {
        let g: Granularity = serde_yaml::from_str("hour").unwrap();
        assert_eq!(g, Granularity::Hour);
        assert_eq!(Granularity::Mission.to_string(), "mission");
    }
}
