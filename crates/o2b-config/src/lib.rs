//! Configuration management for o2b.
//!
//! Two loaders run before any Bookstack call is made:
//!
//! - [`load_env`] resolves a dotenv file and loads the Bookstack credentials
//!   into the process environment.
//! - [`load_toml`] resolves and parses the TOML config file.
//!
//! Both remember the path they resolved in a [`PathStore`], so a later run
//! without explicit paths picks up the same files.
//!
//! ## Environment Variable Expansion
//!
//! `wiki.path` supports environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod env;
mod expand;
mod file;
mod path;
mod store;

use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use env::{DEFAULT_ENV_FILE, load_env};
pub use file::{CONFIG_FILENAME, load_toml};
pub use path::normalize_user_path;
pub use store::{
    MemoryStore, PathKey, PathStore, SqliteStore, StoreError, default_config_dir,
};

/// Typed view of the TOML configuration file.
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Vault configuration.
    pub wiki: WikiConfig,
}

/// `[wiki]` section.
#[derive(Debug, Deserialize)]
pub struct WikiConfig {
    /// Root directory of the note vault.
    pub path: PathBuf,
    /// Directory names skipped when walking the vault.
    #[serde(default)]
    pub excluded: Vec<String>,
}

impl Settings {
    /// Build settings from a parsed config table.
    ///
    /// Expands `${VAR}` references and a leading `~` in `wiki.path`.
    pub fn from_table(table: toml::Table) -> Result<Self, ConfigError> {
        let mut settings: Self = toml::Value::Table(table).try_into()?;
        settings.resolve_paths()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Vault root directory.
    #[must_use]
    pub fn vault_dir(&self) -> &Path {
        &self.wiki.path
    }

    fn resolve_paths(&mut self) -> Result<(), ConfigError> {
        let raw = self.wiki.path.to_string_lossy();
        let expanded = expand::expand_env(&raw, "wiki.path")?;
        self.wiki.path = PathBuf::from(shellexpand::tilde(&expanded).as_ref());
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.wiki.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "wiki.path cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Config file could not be read.
    #[error("Error loading config file '{}': {source}", .path.display())]
    Io {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// Config file is not valid TOML.
    #[error("{diagnostic}")]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Human-readable diagnostic, including remediation hints.
        diagnostic: String,
    },
    /// Config table does not match the expected schema.
    #[error("Invalid config: {0}")]
    Schema(#[from] toml::de::Error),
    /// Dotenv file exists but could not be loaded.
    #[error("Error loading environment variables from '{}': {source}", .path.display())]
    Dotenv {
        /// Dotenv file path.
        path: PathBuf,
        /// Underlying error.
        source: dotenvy::Error,
    },
    /// Remembered path store failure.
    #[error("Path store error: {0}")]
    Store(#[from] StoreError),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`wiki.path`").
        field: String,
        /// Error message (e.g., "${`VAULT_DIR`} not set").
        message: String,
    },
}
