//! Data-access clients for SDO/EVE irradiance products.
//!
//! Each product (Level 0CS, 2B, 2, 3, merged 3) is a [`ClientVariant`]:
//! a bound URL pattern, a file granularity and a query predicate. The
//! [`ClientRegistry`] picks the variants responsible for a query and runs
//! their searches.

pub mod catalog;
pub mod config;
pub mod coverage;
pub mod granularity;
pub mod predicate;
pub mod registry;
pub mod variant;

pub use coverage::{overall_range, FileCoverage, SearchRow};
pub use granularity::{Granularity, FULL_HISTORY_START};
pub use predicate::{LevelMatch, MatchMode, QueryPredicate, TimeConstraint};
pub use registry::ClientRegistry;
pub use variant::{ClientVariant, ProductInfo, VariantSpec};
