//! Query predicates: does a client variant service a query?
//!
//! A predicate names the instrument, the level and optionally a time window
//! a query must carry. Terms of kinds the predicate does not check are
//! ignored. Evaluation is pure and never fails.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use eve_common::{LevelValue, QueryTerm, TermKind};
use serde::{Deserialize, Serialize};

/// Which level terms satisfy the level requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelMatch {
    /// Integer level only; `"0"` as text does not match `0`.
    Integer(i64),
    /// Integer level, or its exact decimal text (`2` or `"2"`).
    IntegerOrText(i64),
    /// Text level equal to one of these, ignoring ASCII case.
    TextAnyOf(Vec<String>),
}

impl LevelMatch {
    pub fn matches(&self, level: &LevelValue) -> bool {
        match (self, level) {
            (LevelMatch::Integer(want), LevelValue::Int(got)) => want == got,
            (LevelMatch::Integer(_), LevelValue::Text(_)) => false,
            (LevelMatch::IntegerOrText(want), LevelValue::Int(got)) => want == got,
            (LevelMatch::IntegerOrText(want), LevelValue::Text(got)) => *got == want.to_string(),
            (LevelMatch::TextAnyOf(options), LevelValue::Text(got)) => {
                options.iter().any(|o| o.eq_ignore_ascii_case(got))
            }
            (LevelMatch::TextAnyOf(_), LevelValue::Int(_)) => false,
        }
    }
}

/// Validity window a query's time term must fall in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeConstraint {
    /// The query must end on or after this instant (data begins here).
    EndOnOrAfter(DateTime<Utc>),
    /// The query must start strictly before this instant (data retired here).
    StartBefore(DateTime<Utc>),
}

impl TimeConstraint {
    pub fn admits(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        match self {
            TimeConstraint::EndOnOrAfter(cutover) => end >= *cutover,
            TimeConstraint::StartBefore(cutover) => start < *cutover,
        }
    }
}

/// How satisfying terms are tallied.
///
/// `DistinctKinds` records each satisfied requirement kind once, so two
/// matching instrument terms still leave the level requirement open.
/// `Counting` adds one per satisfying term; two matching instrument terms
/// then reach the same total as one instrument and one level term. The
/// Level 0 client has always counted, and keeps doing so.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    Counting,
    #[default]
    DistinctKinds,
}

/// Required terms for one client variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryPredicate {
    /// Instrument name, compared ignoring ASCII case.
    pub instrument: String,
    pub level: LevelMatch,
    #[serde(default)]
    pub time: Option<TimeConstraint>,
    #[serde(default)]
    pub mode: MatchMode,
}

impl QueryPredicate {
    /// Number of requirement kinds this predicate checks.
    pub fn required(&self) -> usize {
        2 + usize::from(self.time.is_some())
    }

    /// The requirement kind `term` satisfies, if any.
    fn satisfied_by(&self, term: &QueryTerm) -> Option<TermKind> {
        match term {
            QueryTerm::Instrument(name) if name.eq_ignore_ascii_case(&self.instrument) => {
                Some(TermKind::Instrument)
            }
            QueryTerm::Level(level) if self.level.matches(level) => Some(TermKind::Level),
            QueryTerm::Time(range) => self
                .time
                .filter(|c| c.admits(range.start(), range.end()))
                .map(|_| TermKind::Time),
            QueryTerm::Instrument(_)
            | QueryTerm::Level(_)
            | QueryTerm::Source(_)
            | QueryTerm::Provider(_)
            | QueryTerm::Physobs(_)
            | QueryTerm::Wavelength { .. } => None,
        }
    }

    /// Whether a query made of `terms` is serviced by this variant.
    pub fn can_handle(&self, terms: &[QueryTerm]) -> bool {
        let matched = terms.iter().filter_map(|t| self.satisfied_by(t));
        match self.mode {
            MatchMode::Counting => matched.count() == self.required(),
            MatchMode::DistinctKinds => {
                matched.collect::<BTreeSet<_>>().len() == self.required()
            }
        }
    }
}
