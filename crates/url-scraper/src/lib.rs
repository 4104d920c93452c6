//! Date-templated URL patterns for archives partitioned by time.
//!
//! A pattern such as
//! `level2b/%Y/%j/EV{product}_L2B_%Y%j_{version:03d}_{revision:02d}.fit.gz`
//! mixes strftime-style date tokens with named fields. Fields are bound once
//! when the pattern is built; date tokens are rendered per partition.
//!
//! This crate handles:
//!
//! - Binding named fields (`{name}`, `{name:03d}`) at construction
//! - Rendering a concrete URL for a timestamp
//! - Enumerating one URL per partition over a time range
//! - Inverting a concrete URL back to the date it encodes
//! - Filtering a remote directory listing down to matching files

mod fields;
pub mod listing;
pub mod pattern;

pub use fields::FieldValue;
pub use listing::{filelist, DirectoryListing, StaticListing};
pub use pattern::{DateToken, Resolution, UrlPattern};
