//! Search constraints supplied by a query front-end.

use serde::{Deserialize, Serialize};

use crate::time::TimeRange;

/// A data level as written by the caller: `Level(2)` or `Level("2b")`.
///
/// Integer and text forms stay distinct; some clients accept only one of them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelValue {
    Int(i64),
    Text(String),
}

impl LevelValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            LevelValue::Int(v) => Some(*v),
            LevelValue::Text(_) => None,
        }
    }

    /// Parse a command-line level: digits become `Int`, everything else `Text`.
    pub fn from_arg(s: &str) -> Self {
        match s.trim().parse::<i64>() {
            Ok(v) => LevelValue::Int(v),
            Err(_) => LevelValue::Text(s.trim().to_string()),
        }
    }
}

impl From<i64> for LevelValue {
    fn from(v: i64) -> Self {
        LevelValue::Int(v)
    }
}

impl From<&str> for LevelValue {
    fn from(s: &str) -> Self {
        LevelValue::Text(s.to_string())
    }
}

impl std::fmt::Display for LevelValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelValue::Int(v) => write!(f, "{}", v),
            LevelValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

/// One search constraint. A query is an unordered collection of these and
/// may repeat a kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum QueryTerm {
    Instrument(String),
    Level(LevelValue),
    Time(TimeRange),
    Source(String),
    Provider(String),
    Physobs(String),
    /// Wavelength window in nanometres.
    Wavelength { min_nm: f64, max_nm: f64 },
}

/// Discriminant of a [`QueryTerm`], used to collect satisfied requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TermKind {
    Instrument,
    Level,
    Time,
    Source,
    Provider,
    Physobs,
    Wavelength,
}

impl QueryTerm {
    pub fn instrument(name: impl Into<String>) -> Self {
        QueryTerm::Instrument(name.into())
    }

    pub fn level(level: impl Into<LevelValue>) -> Self {
        QueryTerm::Level(level.into())
    }

    pub fn time(range: TimeRange) -> Self {
        QueryTerm::Time(range)
    }

    pub fn source(name: impl Into<String>) -> Self {
        QueryTerm::Source(name.into())
    }

    pub fn kind(&self) -> TermKind {
        match self {
            QueryTerm::Instrument(_) => TermKind::Instrument,
            QueryTerm::Level(_) => TermKind::Level,
            QueryTerm::Time(_) => TermKind::Time,
            QueryTerm::Source(_) => TermKind::Source,
            QueryTerm::Provider(_) => TermKind::Provider,
            QueryTerm::Physobs(_) => TermKind::Physobs,
            QueryTerm::Wavelength { .. } => TermKind::Wavelength,
        }
    }
}

/// First time term of a query, if any.
pub fn time_term(terms: &[QueryTerm]) -> Option<&TimeRange> {
    terms.iter().find_map(|t| match t {
        QueryTerm::Time(range) => Some(range),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_arg() {
        assert_eq!(LevelValue::from_arg("2"), LevelValue::Int(2));
        assert_eq!(LevelValue::from_arg("2b"), LevelValue::Text("2b".into()));
        assert_eq!(LevelValue::from_arg(" 3merged "), LevelValue::Text("3merged".into()));
    }

    #[test]
    fn test_time_term_takes_first() {
        let a = TimeRange::parse("2012/1/1", "2012/1/2").unwrap();
        let b = TimeRange::parse("2013/1/1", "2013/1/2").unwrap();
        let terms = vec![
            QueryTerm::instrument("eve"),
            QueryTerm::time(a),
            QueryTerm::time(b),
        ];
        assert_eq!(time_term(&terms), Some(&a));
        assert_eq!(time_term(&terms[..1]), None);
    }

    #[test]
    fn test_term_kind() {
        assert_eq!(QueryTerm::level(0).kind(), TermKind::Level);
        assert_eq!(
            QueryTerm::Wavelength { min_nm: 10.0, max_nm: 20.0 }.kind(),
            TermKind::Wavelength
        );
    }
}
