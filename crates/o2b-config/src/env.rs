//! Dotenv loading.

use std::path::{Path, PathBuf};

use tracing::{debug, error, warn};

use crate::ConfigError;
use crate::path::normalize_user_path;
use crate::store::{PathKey, PathStore};

/// Dotenv file used when nothing else is given or remembered.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Resolve the dotenv file and load it into the process environment.
///
/// Resolution order: `explicit` (normalized with [`normalize_user_path`]),
/// then the path remembered in `store`, then [`DEFAULT_ENV_FILE`] in the
/// current directory. The resolved path is remembered for the next run;
/// failing to remember it only logs a warning.
///
/// A missing file is not an error. It is reported with a warning unless it
/// is the default `.env`. Variables already present in the environment are
/// left untouched.
///
/// Returns the resolved path.
///
/// # Errors
///
/// Returns [`ConfigError::Dotenv`] if the file exists but cannot be read or
/// parsed.
pub fn load_env(explicit: Option<&str>, store: &dyn PathStore) -> Result<PathBuf, ConfigError> {
    let env_path = resolve_env_path(explicit, store);
    debug!("Using environment file {}", env_path.display());

    if let Err(e) = store.set(PathKey::Env, &env_path) {
        warn!("Could not remember environment file path: {e}");
    }

    if env_path.exists() {
        dotenvy::from_path(&env_path).map_err(|source| {
            error!(
                "Error loading environment variables from {}: {source}",
                env_path.display()
            );
            ConfigError::Dotenv {
                path: env_path.clone(),
                source,
            }
        })?;
    } else if env_path != Path::new(DEFAULT_ENV_FILE) {
        warn!("Environment file not found: {}", env_path.display());
    }

    Ok(env_path)
}

fn resolve_env_path(explicit: Option<&str>, store: &dyn PathStore) -> PathBuf {
    if let Some(raw) = explicit.filter(|raw| !raw.is_empty()) {
        return normalize_user_path(raw);
    }

    match store.get(PathKey::Env) {
        Ok(Some(remembered)) => remembered,
        Ok(None) => PathBuf::from(DEFAULT_ENV_FILE),
        Err(e) => {
            warn!("Could not read remembered environment file path: {e}");
            PathBuf::from(DEFAULT_ENV_FILE)
        }
    }
}
