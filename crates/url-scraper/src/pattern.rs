//! URL pattern parsing, rendering, enumeration and inversion.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use eve_common::{EveError, EveResult, TimeRange};
use regex::Regex;
use tracing::trace;

use crate::fields::{bind_fields, FieldValue};

/// A strftime-style date token supported in patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DateToken {
    /// `%Y`, year padded to four digits, signed before year 0
    Year,
    /// `%y`, two-digit year
    YearShort,
    /// `%m`
    Month,
    /// `%d`
    Day,
    /// `%j`, day of year
    DayOfYear,
    /// `%H`
    Hour,
    /// `%M`
    Minute,
    /// `%S`
    Second,
}

impl DateToken {
    fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'Y' => DateToken::Year,
            'y' => DateToken::YearShort,
            'm' => DateToken::Month,
            'd' => DateToken::Day,
            'j' => DateToken::DayOfYear,
            'H' => DateToken::Hour,
            'M' => DateToken::Minute,
            'S' => DateToken::Second,
            _ => return None,
        })
    }

    fn regex(self) -> &'static str {
        match self {
            DateToken::Year => r"(-?\d{4,})",
            DateToken::DayOfYear => r"(\d{3})",
            _ => r"(\d{2})",
        }
    }

    fn render(self, dt: &DateTime<Utc>) -> String {
        match self {
            DateToken::Year if dt.year() < 0 => format!("-{:04}", dt.year().unsigned_abs()),
            DateToken::Year => format!("{:04}", dt.year()),
            DateToken::YearShort => format!("{:02}", dt.year().rem_euclid(100)),
            DateToken::Month => format!("{:02}", dt.month()),
            DateToken::Day => format!("{:02}", dt.day()),
            DateToken::DayOfYear => format!("{:03}", dt.ordinal()),
            DateToken::Hour => format!("{:02}", dt.hour()),
            DateToken::Minute => format!("{:02}", dt.minute()),
            DateToken::Second => format!("{:02}", dt.second()),
        }
    }

    fn resolution(self) -> Resolution {
        match self {
            DateToken::Year | DateToken::YearShort => Resolution::Year,
            DateToken::Month => Resolution::Month,
            DateToken::Day | DateToken::DayOfYear => Resolution::Day,
            DateToken::Hour => Resolution::Hour,
            DateToken::Minute => Resolution::Minute,
            DateToken::Second => Resolution::Second,
        }
    }
}

/// Finest time unit a pattern distinguishes. Ordered finest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Resolution {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Date(DateToken),
}

/// A fully bound URL pattern.
#[derive(Debug, Clone)]
pub struct UrlPattern {
    bound: String,
    segments: Vec<Segment>,
    matcher: Regex,
    groups: Vec<DateToken>,
}

impl PartialEq for UrlPattern {
    fn eq(&self, other: &Self) -> bool {
        self.bound == other.bound
    }
}

impl UrlPattern {
    /// Build a pattern, binding every `{name}` field from `fields`.
    ///
    /// Fails on unbound fields, malformed braces and unsupported `%` tokens.
    pub fn new(template: &str, fields: &BTreeMap<String, FieldValue>) -> EveResult<Self> {
        let bound = bind_fields(template, fields)?;
        let segments = parse_segments(&bound)?;

        let mut regex_src = String::from("^");
        let mut groups = Vec::new();
        for segment in &segments {
            match segment {
                Segment::Literal(text) => regex_src.push_str(&regex::escape(text)),
                Segment::Date(token) => {
                    regex_src.push_str(token.regex());
                    groups.push(*token);
                }
            }
        }
        regex_src.push('$');

        let matcher = Regex::new(&regex_src).map_err(|e| EveError::InvalidPattern {
            pattern: template.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            bound,
            segments,
            matcher,
            groups,
        })
    }

    /// Build a pattern that has no named fields.
    pub fn without_fields(template: &str) -> EveResult<Self> {
        Self::new(template, &BTreeMap::new())
    }

    /// The template with fields substituted and date tokens left in place.
    pub fn as_str(&self) -> &str {
        &self.bound
    }

    /// Whether the pattern contains any date token.
    pub fn has_date_tokens(&self) -> bool {
        !self.groups.is_empty()
    }

    /// Finest unit the pattern encodes, or `None` for a date-less pattern.
    pub fn resolution(&self) -> Option<Resolution> {
        self.groups.iter().map(|t| t.resolution()).min()
    }

    /// File extension: text after the last `.`.
    pub fn extension(&self) -> &str {
        self.bound.rsplit('.').next().unwrap_or("")
    }

    /// Render the concrete URL for `dt`.
    pub fn render(&self, dt: &DateTime<Utc>) -> String {
        render_segments(&self.segments, dt)
    }

    /// Render only the directory part (up to and including the last `/`).
    pub fn render_directory(&self, dt: &DateTime<Utc>) -> String {
        let full = self.render(dt);
        match full.rfind('/') {
            Some(idx) => full[..=idx].to_string(),
            None => String::new(),
        }
    }

    /// One URL per step from `range.start` while the step start is `<= range.end`.
    ///
    /// Consecutive duplicates are collapsed, so stepping a daily pattern
    /// hourly still yields one URL per day. A date-less pattern always yields
    /// exactly one URL.
    pub fn enumerate(&self, range: &TimeRange, step: Duration) -> Vec<String> {
        if !self.has_date_tokens() || step <= Duration::zero() {
            return vec![self.render(&range.start())];
        }

        let mut urls: Vec<String> = Vec::new();
        let mut t = range.start();
        while t <= range.end() {
            let url = self.render(&t);
            if urls.last() != Some(&url) {
                urls.push(url);
            }
            t = match t.checked_add_signed(step) {
                Some(next) => next,
                None => break,
            };
        }

        trace!(pattern = %self.bound, count = urls.len(), "Enumerated URLs");
        urls
    }

    /// Whether `url` follows this pattern exactly.
    pub fn matches(&self, url: &str) -> bool {
        self.matcher.is_match(url)
    }

    /// Recover the date encoded in `url`.
    ///
    /// Returns `Ok(None)` for a pattern without date tokens. A URL that does
    /// not follow the pattern, repeats a token with different values, or
    /// encodes an impossible date yields [`EveError::PatternMismatch`].
    pub fn extract_date(&self, url: &str) -> EveResult<Option<DateTime<Utc>>> {
        let mismatch = || EveError::pattern_mismatch(&self.bound, url);

        let caps = self.matcher.captures(url).ok_or_else(mismatch)?;
        if self.groups.is_empty() {
            return Ok(None);
        }

        let mut values: BTreeMap<DateToken, i64> = BTreeMap::new();
        for (idx, token) in self.groups.iter().enumerate() {
            let text = caps.get(idx + 1).ok_or_else(mismatch)?.as_str();
            let value: i64 = text.parse().map_err(|_| mismatch())?;
            if let Some(previous) = values.insert(*token, value) {
                if previous != value {
                    return Err(mismatch());
                }
            }
        }

        let field = |token: DateToken, default: u32| -> EveResult<u32> {
            match values.get(&token) {
                Some(v) => u32::try_from(*v).map_err(|_| mismatch()),
                None => Ok(default),
            }
        };

        let year = match (values.get(&DateToken::Year), values.get(&DateToken::YearShort)) {
            (Some(y), Some(short)) if y.rem_euclid(100) != *short => return Err(mismatch()),
            (Some(y), _) => i32::try_from(*y).map_err(|_| mismatch())?,
            (None, Some(short)) if *short < 69 => 2000 + *short as i32,
            (None, Some(short)) => 1900 + *short as i32,
            (None, None) => 1900,
        };

        let (month, day) = (field(DateToken::Month, 1)?, field(DateToken::Day, 1)?);
        let month_day = || NaiveDate::from_ymd_opt(year, month, day);
        let date = if values.contains_key(&DateToken::DayOfYear) {
            let doy = field(DateToken::DayOfYear, 1)?;
            let date = NaiveDate::from_yo_opt(year, doy).ok_or_else(mismatch)?;
            let has_month_day =
                values.contains_key(&DateToken::Month) || values.contains_key(&DateToken::Day);
            if has_month_day && month_day() != Some(date) {
                return Err(mismatch());
            }
            date
        } else {
            month_day().ok_or_else(mismatch)?
        };

        let time = NaiveTime::from_hms_opt(
            field(DateToken::Hour, 0)?,
            field(DateToken::Minute, 0)?,
            field(DateToken::Second, 0)?,
        )
        .ok_or_else(mismatch)?;

        Ok(Some(Utc.from_utc_datetime(&date.and_time(time))))
    }
}

impl std::fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.bound)
    }
}

fn parse_segments(bound: &str) -> EveResult<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = bound.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            literal.push(c);
            continue;
        }
        match chars.next() {
            Some('%') => literal.push('%'),
            Some(spec) => {
                let token = DateToken::from_char(spec).ok_or(EveError::UnsupportedToken(spec))?;
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Date(token));
            }
            None => {
                return Err(EveError::InvalidPattern {
                    pattern: bound.to_string(),
                    message: "trailing '%'".to_string(),
                })
            }
        }
    }
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    Ok(segments)
}

fn render_segments(segments: &[Segment], dt: &DateTime<Utc>) -> String {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Literal(text) => text.clone(),
            Segment::Date(token) => token.render(dt),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const L0CS: &str = "http://lasp.colorado.edu/eve/data_access/evewebdata/quicklook/\
                        L0CS/SpWx/%Y/%Y%m%d_EVE_L0CS_DIODES_1m.txt";

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_render_day_of_year() {
        let pattern = UrlPattern::without_fields("level2b/%Y/%j/EVS_L2B_%Y%j.fit.gz").unwrap();
        assert_eq!(
            pattern.render(&at(2018, 4, 20, 0)),
            "level2b/2018/110/EVS_L2B_2018110.fit.gz"
        );
    }

    #[test]
    fn test_unsupported_token() {
        let err = UrlPattern::without_fields("data/%Q.txt").unwrap_err();
        assert!(matches!(err, EveError::UnsupportedToken('Q')));
    }

    #[test]
    fn test_percent_literal() {
        let pattern = UrlPattern::without_fields("a%%b/%Y").unwrap();
        assert_eq!(pattern.render(&at(2020, 1, 1, 0)), "a%b/2020");
        assert_eq!(pattern.resolution(), Some(Resolution::Year));
    }

    #[test]
    fn test_extract_date_l0cs() {
        let pattern = UrlPattern::without_fields(L0CS).unwrap();
        let url = pattern.render(&at(2012, 4, 21, 0));
        assert_eq!(pattern.extract_date(&url).unwrap(), Some(at(2012, 4, 21, 0)));
    }

    #[test]
    fn test_extract_date_rejects_disagreeing_years() {
        let pattern = UrlPattern::without_fields(L0CS).unwrap();
        let url = "http://lasp.colorado.edu/eve/data_access/evewebdata/quicklook/\
                   L0CS/SpWx/2011/20120421_EVE_L0CS_DIODES_1m.txt";
        assert!(matches!(
            pattern.extract_date(url),
            Err(EveError::PatternMismatch { .. })
        ));
    }

    #[test]
    fn test_extract_date_rejects_impossible_date() {
        let pattern = UrlPattern::without_fields("%Y/%j.fit").unwrap();
        assert!(pattern.extract_date("2018/367.fit").is_err());
        assert!(pattern.extract_date("2018/12.fit").is_err());
    }

    #[test]
    fn test_dateless_pattern() {
        let pattern = UrlPattern::without_fields("merged/latest_EVE_L3_merged.fit").unwrap();
        assert!(!pattern.has_date_tokens());
        assert_eq!(pattern.resolution(), None);
        assert_eq!(
            pattern.extract_date("merged/latest_EVE_L3_merged.fit").unwrap(),
            None
        );
        assert!(pattern.extract_date("merged/other.fit").is_err());
    }

    #[test]
    fn test_enumerate_collapses_duplicates() {
        let pattern = UrlPattern::without_fields("%Y/%m/%d.txt").unwrap();
        let range = TimeRange::new(at(2012, 5, 5, 0), at(2012, 5, 6, 23)).unwrap();
        let urls = pattern.enumerate(&range, Duration::hours(1));
        assert_eq!(urls, vec!["2012/05/05.txt", "2012/05/06.txt"]);
    }

    #[test]
    fn test_years_beyond_four_digits_invert() {
        let pattern = UrlPattern::without_fields("%Y/%j/EVS_L2B_%Y%j.fit.gz").unwrap();
        let far = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap();
        let url = pattern.render(&far);
        assert_eq!(url, "10000/001/EVS_L2B_10000001.fit.gz");
        assert_eq!(pattern.extract_date(&url).unwrap(), Some(far));

        let early = Utc.with_ymd_and_hms(-44, 3, 15, 0, 0, 0).unwrap();
        let url = pattern.render(&early);
        assert_eq!(url, "-0044/075/EVS_L2B_-0044075.fit.gz");
        assert_eq!(pattern.extract_date(&url).unwrap(), Some(early));
    }

    #[test]
    fn test_enumerate_stops_at_latest_instant() {
        let pattern = UrlPattern::without_fields(L0CS).unwrap();
        let end = DateTime::<Utc>::MAX_UTC;
        let range = TimeRange::new(end - Duration::hours(1), end).unwrap();
        let urls = pattern.enumerate(&range, Duration::days(1));
        assert_eq!(urls, vec![pattern.render(&end)]);
    }

    #[test]
    fn test_render_directory() {
        let pattern = UrlPattern::without_fields("http://host/%Y/%j/f_%H.fit").unwrap();
        assert_eq!(
            pattern.render_directory(&at(2018, 1, 1, 14)),
            "http://host/2018/001/"
        );
        assert_eq!(pattern.extension(), "fit");
    }

    #[test]
    fn test_short_year_pivot() {
        let pattern = UrlPattern::without_fields("%y%m%d").unwrap();
        assert_eq!(pattern.extract_date("120421").unwrap(), Some(at(2012, 4, 21, 0)));
        assert_eq!(pattern.extract_date("990101").unwrap(), Some(at(1999, 1, 1, 0)));
    }
}
