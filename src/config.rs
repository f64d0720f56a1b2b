//! Category mapping configuration.
//!
//! The mapping table is read from a TOML document:
//!
//! ```toml
//! [category_mappings]
//! "Gasoline/Fuel" = "Gas"
//! "Transfers" = "Transfer"
//!
//! [settings]
//! case_sensitive_matching = false
//! ```
//!
//! Loading never fails from the caller's point of view: a missing or invalid
//! document yields the built-in table and a [`MappingSource::Defaults`] that
//! carries the reason.

use crate::category::{CategoryTranslator, MappingTable};
use crate::error::{MigrateError, Result};
use log::{debug, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "category_mappings.toml";

/// Document as deserialized; `toml`'s `preserve_order` keeps the mapping
/// table in document order.
#[derive(Debug, Deserialize)]
struct RawMappingConfig {
    category_mappings: toml::Table,

    #[serde(default)]
    settings: MappingSettings,
}

/// Validated mapping configuration.
#[derive(Debug)]
pub struct MappingConfig {
    /// Source category → destination category, in document order.
    pub category_mappings: MappingTable,

    /// Optional matching behavior.
    pub settings: MappingSettings,
}

/// `[settings]` section.
#[derive(Debug, Deserialize)]
pub struct MappingSettings {
    /// Exact-match only when `true`.
    #[serde(default = "default_case_sensitive")]
    pub case_sensitive_matching: bool,
}

fn default_case_sensitive() -> bool {
    true
}

impl Default for MappingSettings {
    fn default() -> Self {
        MappingSettings {
            case_sensitive_matching: default_case_sensitive(),
        }
    }
}

impl MappingConfig {
    /// Parses and validates a configuration document.
    ///
    /// `path` is only used to label errors.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let raw: RawMappingConfig = toml::from_str(content).map_err(|e| MigrateError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut category_mappings = MappingTable::with_capacity(raw.category_mappings.len());
        for (from, to) in raw.category_mappings {
            match to.as_str() {
                Some(to) => category_mappings.push((from, to.to_string())),
                None => {
                    return Err(MigrateError::Config {
                        path: path.to_path_buf(),
                        message: format!("category '{}' must map to a string", from),
                    })
                }
            }
        }

        let config = MappingConfig {
            category_mappings,
            settings: raw.settings,
        };
        config.validate(path)?;
        Ok(config)
    }

    /// Reads, parses and validates the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| MigrateError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&content, path)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        let invalid = |message: String| MigrateError::Config {
            path: path.to_path_buf(),
            message,
        };

        if self.category_mappings.is_empty() {
            return Err(invalid("category_mappings must not be empty".into()));
        }

        for (from, to) in &self.category_mappings {
            if from.trim().is_empty() {
                return Err(invalid("category_mappings contains an empty source category".into()));
            }
            if to.trim().is_empty() {
                return Err(invalid(format!(
                    "category '{}' maps to an empty destination category",
                    from
                )));
            }
        }

        Ok(())
    }

    /// Builds the translator described by this configuration.
    pub fn into_translator(self) -> CategoryTranslator {
        CategoryTranslator::new(
            self.category_mappings,
            self.settings.case_sensitive_matching,
        )
    }
}

/// Where the active mapping table came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingSource {
    /// Loaded from a valid configuration file.
    Config(PathBuf),

    /// Built-in table substituted; `reason` explains why.
    Defaults { reason: String },
}

impl MappingSource {
    /// Returns `true` if the built-in table is in use.
    pub fn is_fallback(&self) -> bool {
        matches!(self, MappingSource::Defaults { .. })
    }
}

/// A ready translator together with its provenance.
#[derive(Debug, Clone)]
pub struct LoadedMappings {
    pub translator: CategoryTranslator,
    pub source: MappingSource,
}

/// Loads the mapping table from `path`, falling back to the built-in table.
///
/// Configuration problems are logged at warn level and reported through
/// [`LoadedMappings::source`]; they never abort the run.
pub fn load_mappings(path: &Path) -> LoadedMappings {
    match MappingConfig::load(path) {
        Ok(config) => {
            let translator = config.into_translator();
            debug!(
                "Loaded {} category mappings from {} (case sensitive: {})",
                translator.len(),
                path.display(),
                translator.is_case_sensitive()
            );
            LoadedMappings {
                translator,
                source: MappingSource::Config(path.to_path_buf()),
            }
        }
        Err(e) => {
            warn!("{}; using built-in category mappings", e);
            LoadedMappings {
                translator: CategoryTranslator::with_defaults(),
                source: MappingSource::Defaults {
                    reason: e.to_string(),
                },
            }
        }
    }
}
