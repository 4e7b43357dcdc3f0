//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/kbase/kbase.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `KBASE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, StoreDefaults};
use crate::domain::{Direction, DocumentType};

/// Unified configuration for kbase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Author recorded on new documents, versions and attachments
    pub author: String,
    /// Direction shown when none is given on the command line
    pub default_direction: Direction,
    /// Type preselected in the add-document dialog
    pub default_document_type: DocumentType,
    /// Column count of a freshly inserted table
    pub table_columns: usize,
}

impl Default for Settings {
    fn default() -> Self {
        let defaults = StoreDefaults::default();
        Self {
            author: defaults.author,
            default_direction: Direction::SafeCity,
            default_document_type: DocumentType::Instruction,
            table_columns: defaults.table_columns,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub author: Option<String>,
    pub default_direction: Option<Direction>,
    pub default_document_type: Option<DocumentType>,
    pub table_columns: Option<usize>,
}

/// Get the XDG config directory for kbase.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "kbase").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("kbase.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// An explicit file must exist; the global file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = explicit {
            debug!("loading config {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = current.apply_env_overrides(kbase_env())?;
        current.validate()?;
        Ok(current)
    }

    /// Scalar fields: overlay wins if specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            author: overlay.author.clone().unwrap_or_else(|| self.author.clone()),
            default_direction: overlay.default_direction.unwrap_or(self.default_direction),
            default_document_type: overlay
                .default_document_type
                .unwrap_or(self.default_document_type),
            table_columns: overlay.table_columns.unwrap_or(self.table_columns),
        }
    }

    /// Apply `KBASE_*` variables read through `env` as explicit overrides.
    fn apply_env_overrides(mut self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("author") {
            self.author = val;
        }
        if let Ok(val) = config.get_string("default_direction") {
            self.default_direction = val.parse()?;
        }
        if let Ok(val) = config.get_string("default_document_type") {
            self.default_document_type = val.parse()?;
        }
        if let Ok(val) = config.get_string("table_columns") {
            self.table_columns = val.trim().parse().map_err(|_| ApplicationError::Config {
                message: format!("table_columns is not a number: {val}"),
            })?;
        }
        Ok(self)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.author.trim().is_empty() {
            return Err(ApplicationError::Config {
                message: "author must not be empty".into(),
            });
        }
        if self.table_columns == 0 {
            return Err(ApplicationError::Config {
                message: "table_columns must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Values the store stamps onto new content.
    pub fn store_defaults(&self) -> StoreDefaults {
        StoreDefaults {
            author: self.author.clone(),
            table_columns: self.table_columns,
        }
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# kbase configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/kbase/kbase.toml
#   Explicit: kbase --config <file>
#   Env:      KBASE_* environment variables (e.g. KBASE_AUTHOR)

# Author recorded on new documents, versions and attachments
# author = "Current user"

# Direction used when -D is not given: "safe-city" or "transport"
# default_direction = "safe-city"

# Type preselected for new documents: instruction, process, document, reference
# default_document_type = "instruction"

# Number of columns of a newly inserted table
# table_columns = 3
"#
        .to_string()
    }
}

fn kbase_env() -> Environment {
    Environment::with_prefix("KBASE")
        .prefix_separator("_")
        .separator("__")
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
