//! Registry of client variants and query dispatch.

use std::path::Path;

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use eve_common::{EveResult, QueryTerm};
use tracing::{debug, info};

use crate::catalog;
use crate::config::load_variants;
use crate::coverage::SearchRow;
use crate::variant::ClientVariant;

/// Ordered set of client variants, unique by id.
#[derive(Debug, Clone, Default)]
pub struct ClientRegistry {
    variants: Vec<ClientVariant>,
}

impl ClientRegistry {
    /// The five built-in EVE variants.
    pub fn eve() -> EveResult<Self> {
        Ok(Self::from_variants(catalog::eve_variants()?))
    }

    pub fn from_variants(variants: Vec<ClientVariant>) -> Self {
        let mut registry = Self::default();
        for variant in variants {
            registry.insert(variant);
        }
        registry
    }

    /// Built-in variants overlaid with those in `config_dir/variants`.
    ///
    /// A configured variant replaces the built-in one with the same id.
    pub fn with_config_dir(config_dir: &Path) -> Result<Self> {
        let mut registry = Self::eve()?;
        for variant in load_variants(config_dir)? {
            if let Some(previous) = registry.insert(variant) {
                debug!(variant = %previous.id(), "Replaced built-in variant");
            }
        }
        info!(count = registry.len(), "Client registry ready");
        Ok(registry)
    }

    /// Add `variant`, returning the variant it replaced if the id was taken.
    pub fn insert(&mut self, variant: ClientVariant) -> Option<ClientVariant> {
        match self.variants.iter_mut().find(|v| v.id() == variant.id()) {
            Some(slot) => Some(std::mem::replace(slot, variant)),
            None => {
                self.variants.push(variant);
                None
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&ClientVariant> {
        self.variants.iter().find(|v| v.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClientVariant> {
        self.variants.iter()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Every variant whose predicate accepts `terms`, in registry order.
    pub fn responsible(&self, terms: &[QueryTerm]) -> Vec<&ClientVariant> {
        self.variants.iter().filter(|v| v.can_handle(terms)).collect()
    }

    /// Search rows from every responsible variant.
    ///
    /// Rows are grouped by variant; overlapping variants are not de-duplicated.
    pub fn search_at(&self, terms: &[QueryTerm], today: NaiveDate) -> EveResult<Vec<SearchRow>> {
        let responsible = self.responsible(terms);
        if responsible.is_empty() {
            debug!("No variant accepts the query");
        }

        let mut rows = Vec::new();
        for variant in responsible {
            rows.extend(variant.search_at(terms, today)?);
        }
        Ok(rows)
    }

    pub fn search(&self, terms: &[QueryTerm]) -> EveResult<Vec<SearchRow>> {
        self.search_at(terms, Utc::now().date_naive())
    }
}
