//! Bookstack API token credentials.

use std::fmt;

/// Environment variable holding the API token id.
pub const TOKEN_ID_VAR: &str = "BOOKSTACK_TOKEN_ID";
/// Environment variable holding the API token secret.
pub const TOKEN_SECRET_VAR: &str = "BOOKSTACK_TOKEN_SECRET";
/// Environment variable holding the instance base URL.
pub const BASE_URL_VAR: &str = "BOOKSTACK_BASE_URL";

/// API token and instance URL.
///
/// Nothing is validated on construction; an empty `base_url` is rejected
/// when the first request is made.
#[derive(Clone, Default)]
pub struct Credentials {
    /// Token id.
    pub id: String,
    /// Token secret.
    pub secret: String,
    /// Instance base URL, without trailing slash.
    pub base_url: String,
}

impl Credentials {
    /// Create credentials, trimming any trailing `/` from `base_url`.
    pub fn new(id: impl Into<String>, secret: impl Into<String>, base_url: &str) -> Self {
        Self {
            id: id.into(),
            secret: secret.into(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Read credentials from the `BOOKSTACK_*` environment variables.
    ///
    /// Unset variables become empty strings.
    #[must_use]
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).unwrap_or_default();
        Self::new(var(TOKEN_ID_VAR), var(TOKEN_SECRET_VAR), &var(BASE_URL_VAR))
    }

    /// Value of the `Authorization` header.
    pub(crate) fn authorization(&self) -> String {
        format!("Token {}:{}", self.id, self.secret)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("id", &self.id)
            .field("secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;

    #[test]
    fn test_authorization_header() {
        let creds = Credentials::new("abc", "xyz", "https://wiki.example.com");
        assert_eq!(creds.authorization(), "Token abc:xyz");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let creds = Credentials::new("a", "b", "https://wiki.example.com/");
        assert_eq!(creds.base_url, "https://wiki.example.com");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("a", "hunter2", "https://wiki.example.com");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    #[serial]
    fn test_from_env_reads_variables() {
        // SAFETY: serialized with other tests touching the environment
        unsafe {
            std::env::set_var(TOKEN_ID_VAR, "env-id");
            std::env::set_var(TOKEN_SECRET_VAR, "env-secret");
            std::env::set_var(BASE_URL_VAR, "http://localhost:6875/");
        }

        let creds = Credentials::from_env();
        assert_eq!(creds.id, "env-id");
        assert_eq!(creds.secret, "env-secret");
        assert_eq!(creds.base_url, "http://localhost:6875");

        unsafe {
            std::env::remove_var(TOKEN_ID_VAR);
            std::env::remove_var(TOKEN_SECRET_VAR);
            std::env::remove_var(BASE_URL_VAR);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_missing_is_empty() {
        // SAFETY: serialized with other tests touching the environment
        unsafe {
            std::env::remove_var(TOKEN_ID_VAR);
            std::env::remove_var(TOKEN_SECRET_VAR);
            std::env::remove_var(BASE_URL_VAR);
        }

        let creds = Credentials::from_env();
        assert!(creds.id.is_empty());
        assert!(creds.base_url.is_empty());
    }
}
