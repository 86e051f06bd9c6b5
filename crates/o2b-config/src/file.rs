//! TOML config file loading.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::ConfigError;
use crate::path::normalize_user_path;
use crate::store::{PathKey, PathStore};

/// Config filename inside the config directory.
pub const CONFIG_FILENAME: &str = "conf.toml";

/// Resolve the TOML config file and parse it.
///
/// Without `explicit`, the path remembered in `store` is used, falling back
/// to `<config_dir>/conf.toml`; either way it is remembered again. An
/// explicit path is normalized with [`normalize_user_path`] and not
/// remembered.
///
/// Failures are logged before being returned.
///
/// # Errors
///
/// - [`ConfigError::NotFound`] if the resolved file does not exist
/// - [`ConfigError::Io`] if it cannot be read
/// - [`ConfigError::Parse`] if it is not valid TOML
/// - [`ConfigError::Store`] if the remembered path cannot be read or written
pub fn load_toml(
    explicit: Option<&str>,
    store: &dyn PathStore,
) -> Result<toml::Table, ConfigError> {
    let conf_path = resolve_config_path(explicit, store)?;
    debug!("Using config file {}", conf_path.display());

    if !conf_path.exists() {
        let err = ConfigError::NotFound(conf_path);
        error!("Error: {err}");
        return Err(err);
    }

    let content = std::fs::read_to_string(&conf_path).map_err(|source| {
        let err = ConfigError::Io {
            path: conf_path.clone(),
            source,
        };
        error!("{err}");
        err
    })?;

    toml::from_str(&content).map_err(|e| {
        let diagnostic =
            parse_diagnostic(&conf_path, &e.to_string(), is_escape_error(e.message()));
        error!("{diagnostic}");
        ConfigError::Parse {
            path: conf_path,
            diagnostic,
        }
    })
}

fn resolve_config_path(
    explicit: Option<&str>,
    store: &dyn PathStore,
) -> Result<PathBuf, ConfigError> {
    if let Some(raw) = explicit.filter(|raw| !raw.is_empty()) {
        return Ok(normalize_user_path(raw));
    }

    let conf_path = match store.get(PathKey::Config)? {
        Some(remembered) => remembered,
        None => store.config_dir().join(CONFIG_FILENAME),
    };
    store.set(PathKey::Config, &conf_path)?;
    Ok(conf_path)
}

/// Whether a TOML error message (without the source snippet) reports a bad
/// escape sequence in a basic string.
///
/// `C:\Users` fails as a `\U` unicode escape, `C:\wiki` as a missing
/// escaped value.
fn is_escape_error(message: &str) -> bool {
    let message = message.to_lowercase();
    message.contains("escape") || message.contains("unicode")
}

/// Build the message shown for a TOML parse failure.
///
/// Backslashes in double-quoted strings are the usual culprit for Windows
/// users, so escape errors get remediation steps appended.
fn parse_diagnostic(path: &Path, message: &str, escape_error: bool) -> String {
    let mut diagnostic = format!(
        "Error: Invalid TOML format in config file '{}': {message}",
        path.display()
    );

    if escape_error {
        let _ = write!(
            diagnostic,
            r#"

Windows path issue detected!
In TOML files, backslashes in double-quoted strings are escape sequences.
To fix this, use one of the following options:
  1. Use single quotes (literal strings): path = 'C:\Users\...'
  2. Escape backslashes: path = "C:\\Users\\..."
  3. Use forward slashes (works on Windows): path = "C:/Users/..."

Example:
  [wiki]
  path = "C:/Users/me/Documents/notes"
  # or
  path = 'C:\Users\me\Documents\notes'"#
        );
    }

    diagnostic
}
