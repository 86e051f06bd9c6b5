//! Normalization of user-supplied paths.

use std::path::PathBuf;

/// Normalize a path typed on the command line.
///
/// Surrounding `"` and then `'` characters are stripped (shells on Windows
/// tend to pass them through), then a leading `~` is expanded to the home
/// directory.
#[must_use]
pub fn normalize_user_path(raw: &str) -> PathBuf {
    let unquoted = raw.trim_matches('"').trim_matches('\'');
    PathBuf::from(shellexpand::tilde(unquoted).as_ref())
}
