//! Common types and utilities shared across the EVE data clients.

pub mod error;
pub mod query;
pub mod time;

pub use error::{EveError, EveResult};
pub use query::{time_term, LevelValue, QueryTerm, TermKind};
pub use time::{parse_time, TimeRange};
