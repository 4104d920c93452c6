//! Configuration loading for client variants.
//!
//! Loads variant definitions from YAML files in config/variants/

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use eve_common::time::midnight;
use eve_common::{EveError, EveResult, LevelValue};
use serde::Deserialize;
use tracing::{debug, info, warn};
use url_scraper::FieldValue;

use crate::granularity::Granularity;
use crate::predicate::{LevelMatch, MatchMode, QueryPredicate, TimeConstraint};
use crate::variant::{ClientVariant, ProductInfo, VariantSpec};

/// Root configuration loaded from a variant YAML file.
#[derive(Debug, Clone, Deserialize)]
pub struct VariantConfig {
    pub variant: VariantInfo,
    pub source: SourceConfig,
    pub granularity: Granularity,
    pub predicate: PredicateConfig,
}

/// Variant identification and product metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct VariantInfo {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(flatten)]
    pub product: ProductInfo,
}

fn default_enabled() -> bool {
    true
}

/// Where the product's files live.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub host: String,
    pub path: String,
    /// Values for the `{name}` fields in `path`
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

/// How the `levels` list is compared against a query's level term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LevelMatchKind {
    Integer,
    #[default]
    IntegerOrText,
    Text,
}

/// Query requirements, flattened for YAML.
#[derive(Debug, Clone, Deserialize)]
pub struct PredicateConfig {
    #[serde(default = "default_instrument")]
    pub instrument: String,
    #[serde(rename = "match", default)]
    pub level_match: LevelMatchKind,
    pub levels: Vec<LevelValue>,
    /// First day with data; queries must end on or after it.
    #[serde(default)]
    pub valid_from: Option<NaiveDate>,
    /// Retirement day; queries must start before it.
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
    #[serde(default)]
    pub mode: MatchMode,
}

fn default_instrument() -> String {
    "eve".to_string()
}

impl PredicateConfig {
    pub fn to_predicate(&self, variant: &str) -> EveResult<QueryPredicate> {
        let config_error = |message: &str| EveError::Config(format!("{}: {}", variant, message));

        let level = match self.level_match {
            LevelMatchKind::Integer | LevelMatchKind::IntegerOrText => {
                let value = match self.levels.as_slice() {
                    [single] => single
                        .as_int()
                        .ok_or_else(|| config_error("integer level match needs an integer level"))?,
                    _ => return Err(config_error("integer level match needs exactly one level")),
                };
                if self.level_match == LevelMatchKind::Integer {
                    LevelMatch::Integer(value)
                } else {
                    LevelMatch::IntegerOrText(value)
                }
            }
            LevelMatchKind::Text => {
                if self.levels.is_empty() {
                    return Err(config_error("text level match needs at least one level"));
                }
                let options = self
                    .levels
                    .iter()
                    .map(|level| match level {
                        LevelValue::Int(v) => v.to_string(),
                        LevelValue::Text(s) => s.clone(),
                    })
                    .collect();
                LevelMatch::TextAnyOf(options)
            }
        };

        let time = match (self.valid_from, self.valid_until) {
            (None, None) => None,
            (Some(first), None) => Some(TimeConstraint::EndOnOrAfter(midnight(first))),
            (None, Some(retired)) => Some(TimeConstraint::StartBefore(midnight(retired))),
            (Some(_), Some(_)) => {
                return Err(config_error("only one of valid_from and valid_until may be set"))
            }
        };

        Ok(QueryPredicate {
            instrument: self.instrument.clone(),
            level,
            time,
            mode: self.mode,
        })
    }
}

impl VariantConfig {
    /// Load a variant configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: VariantConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(variant = %config.variant.id, path = %path.display(), "Loaded variant config");
        Ok(config)
    }

    pub fn to_spec(&self) -> EveResult<VariantSpec> {
        Ok(VariantSpec {
            id: self.variant.id.clone(),
            info: self.variant.product.clone(),
            host: self.source.host.clone(),
            path: self.source.path.clone(),
            fields: self.source.fields.clone(),
            granularity: self.granularity,
            predicate: self.predicate.to_predicate(&self.variant.id)?,
        })
    }

    /// Build the client this file describes.
    pub fn build(&self) -> EveResult<ClientVariant> {
        ClientVariant::new(self.to_spec()?)
    }
}

/// Load all enabled variant configurations from a directory.
pub fn load_variant_configs(config_dir: &Path) -> Result<Vec<VariantConfig>> {
    let variants_dir = config_dir.join("variants");

    if !variants_dir.exists() {
        warn!(path = %variants_dir.display(), "Variants config directory not found");
        return Ok(Vec::new());
    }

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(&variants_dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "yaml" || ext == "yml") {
            paths.push(path);
        }
    }
    // read_dir order is platform dependent
    paths.sort();

    let mut configs = Vec::new();
    for path in paths {
        match VariantConfig::load(&path) {
            Ok(config) => {
                if config.variant.enabled {
                    info!(
                        variant = %config.variant.id,
                        name = %config.variant.name,
                        "Loaded variant configuration"
                    );
                    configs.push(config);
                } else {
                    debug!(variant = %config.variant.id, "Skipping disabled variant");
                }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load variant config");
            }
        }
    }

    info!(count = configs.len(), "Loaded variant configurations");
    Ok(configs)
}

/// Load and build every enabled variant in `config_dir/variants`.
///
/// A file whose variant cannot be built is skipped with a warning.
pub fn load_variants(config_dir: &Path) -> Result<Vec<ClientVariant>> {
    let variants = load_variant_configs(config_dir)?
        .iter()
        .filter_map(|config| match config.build() {
            Ok(variant) => Some(variant),
            Err(e) => {
                warn!(variant = %config.variant.id, error = %e, "Failed to build variant");
                None
            }
        })
        .collect();
    Ok(variants)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL_2: &str = r#"
variant:
  id: eve-level2
  name: "EVE Level 2 spectra"
  level: L2

source:
  host: "http://lasp.colorado.edu/eve/data_access/evewebdataproducts/"
  path: "level2/%Y/%j/EV{product}_L2_%Y%j_%H_{version:03d}_{revision:02d}.fit.gz"
  fields:
    product: S
    version: 6
    revision: 2

granularity: hour

predicate:
  levels: [2]
  valid_until: 2018-04-28
"#;

    #[test]
    fn test_parse_level2_config() {
        let config: VariantConfig = serde_yaml::from_str(LEVEL_2).unwrap();
        assert_eq!(config.variant.id, "eve-level2");
        assert!(config.variant.enabled);
        assert_eq!(config.variant.product.source, "SDO");
        assert_eq!(config.variant.product.level, "L2");
        assert_eq!(config.source.fields["version"], FieldValue::Int(6));
        assert_eq!(config.source.fields["product"], FieldValue::Text("S".into()));
        assert_eq!(config.granularity, Granularity::Hour);

        let predicate = config.predicate.to_predicate("eve-level2").unwrap();
        assert_eq!(predicate.level, LevelMatch::IntegerOrText(2));
        assert_eq!(predicate.mode, MatchMode::DistinctKinds);
        assert!(matches!(predicate.time, Some(TimeConstraint::StartBefore(_))));
    }

    #[test]
    fn test_text_levels_render_integers() {
        let config: PredicateConfig =
            serde_yaml::from_str("match: text\nlevels: [3m, 3merged]\nmode: counting").unwrap();
        let predicate = config.to_predicate("x").unwrap();
        assert_eq!(
            predicate.level,
            LevelMatch::TextAnyOf(vec!["3m".into(), "3merged".into()])
        );
        assert_eq!(predicate.mode, MatchMode::Counting);
    }

    #[test]
    fn test_invalid_predicates() {
        let both: PredicateConfig = serde_yaml::from_str(
            "levels: [2]\nvalid_from: 2018-04-20\nvalid_until: 2018-04-28",
        )
        .unwrap();
        assert!(matches!(both.to_predicate("x"), Err(EveError::Config(_))));

        let text_for_int: PredicateConfig =
            serde_yaml::from_str("match: integer\nlevels: [2b]").unwrap();
        assert!(text_for_int.to_predicate("x").is_err());

        let many: PredicateConfig = serde_yaml::from_str("levels: [2, 3]").unwrap();
        assert!(many.to_predicate("x").is_err());
    }

    #[test]
    fn test_build_from_config() {
        let config: VariantConfig = serde_yaml::from_str(LEVEL_2).unwrap();
        let variant = config.build().unwrap();
        assert_eq!(variant.id(), "eve-level2");
        assert_eq!(variant.granularity(), Granularity::Hour);
    }
}
