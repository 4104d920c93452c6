//! Directory-listing driven discovery.
//!
//! Archives publish one directory per date partition. Discovery renders each
//! partition directory, asks a [`DirectoryListing`] for its entries and keeps
//! those that follow the pattern and fall inside the requested range. The
//! listing itself (HTTP index pages, S3 prefixes) lives outside this crate.

use std::collections::BTreeMap;

use chrono::Duration;
use eve_common::{EveError, EveResult, TimeRange};
use tracing::{debug, warn};

use crate::pattern::UrlPattern;

/// Source of directory entries for an archive.
pub trait DirectoryListing {
    /// Entries of `directory` (file names or hrefs relative to it).
    ///
    /// Returns `Ok(None)` when the directory does not exist.
    fn list(&self, directory: &str) -> EveResult<Option<Vec<String>>>;
}

/// In-memory listing keyed by directory URL.
#[derive(Debug, Clone, Default)]
pub struct StaticListing {
    directories: BTreeMap<String, Vec<String>>,
}

impl StaticListing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `entries` under `directory`, replacing any previous entries.
    pub fn insert(&mut self, directory: impl Into<String>, entries: Vec<String>) {
        self.directories.insert(directory.into(), entries);
    }

    /// Build a listing that contains exactly the given full URLs.
    pub fn from_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut listing = Self::new();
        for url in urls {
            let url = url.as_ref();
            let (dir, name) = match url.rfind('/') {
                Some(idx) => (&url[..=idx], &url[idx + 1..]),
                None => ("", url),
            };
            listing
                .directories
                .entry(dir.to_string())
                .or_default()
                .push(name.to_string());
        }
        listing
    }
}

impl DirectoryListing for StaticListing {
    fn list(&self, directory: &str) -> EveResult<Option<Vec<String>>> {
        Ok(self.directories.get(directory).cloned())
    }
}

/// List the files matching `pattern` whose encoded date lies within `range`.
///
/// Partition directories are rendered from `range.start` in `step`
/// increments. Missing directories and entries whose repeated date tokens
/// disagree are skipped. Results are sorted and de-duplicated.
pub fn filelist<L: DirectoryListing + ?Sized>(
    pattern: &UrlPattern,
    listing: &L,
    range: &TimeRange,
    step: Duration,
) -> EveResult<Vec<String>> {
    let mut directories: Vec<String> = Vec::new();
    if pattern.has_date_tokens() && step > Duration::zero() {
        let mut t = range.start();
        while t <= range.end() {
            let dir = pattern.render_directory(&t);
            if directories.last() != Some(&dir) {
                directories.push(dir);
            }
            t = match t.checked_add_signed(step) {
                Some(next) => next,
                None => break,
            };
        }
    } else {
        directories.push(pattern.render_directory(&range.start()));
    }

    let extension = pattern.extension();
    let mut urls = Vec::new();

    for directory in &directories {
        let entries = match listing.list(directory)? {
            Some(entries) => entries,
            None => {
                warn!(directory = %directory, "Directory not found, skipping");
                continue;
            }
        };

        for entry in entries {
            if !entry.ends_with(extension) {
                continue;
            }
            let url = format!("{}{}", directory, entry);
            if !pattern.matches(&url) {
                continue;
            }
            match pattern.extract_date(&url) {
                Ok(Some(date)) if !range.contains(&date) => {}
                Ok(_) => urls.push(url),
                Err(EveError::PatternMismatch { .. }) => {
                    warn!(url = %url, "Entry encodes an inconsistent date, skipping");
                }
                Err(e) => return Err(e),
            }
        }
    }

    urls.sort();
    urls.dedup();
    debug!(
        pattern = %pattern,
        directories = directories.len(),
        count = urls.len(),
        "Listed matching files"
    );
    Ok(urls)
}
