//! `${VAR}` expansion for config values.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Bare `$VAR` is kept literally, even next to a braced reference. An unset
/// variable without a default is an error naming both the variable and the
/// config `field`.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let lookup = |var: &str| {
        std::env::var(var)
            .map(Some)
            .map_err(|_| UnsetVar(var.to_owned()))
    };
    match shellexpand::env_with_context(&escape_bare_dollars(value), lookup) {
        Ok(expanded) => Ok(expanded.into_owned()),
        Err(e) => Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.cause.0),
        }),
    }
}

/// Double every `$` that does not open `${`; shellexpand reads `$$` as `$`.
fn escape_bare_dollars(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        escaped.push(c);
        if c == '$' && chars.peek() != Some(&'{') {
            escaped.push('$');
        }
    }
    escaped
}

/// Name of a variable that was referenced but not set.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_expand_literal_unchanged() {
        assert_eq!(expand_env("C:/notes", "wiki.path").unwrap(), "C:/notes");
    }

    #[test]
    fn test_expand_bare_dollar_unchanged() {
        assert_eq!(expand_env("$HOME/notes", "wiki.path").unwrap(), "$HOME/notes");
    }

    #[test]
    #[serial]
    fn test_expand_bare_dollar_kept_beside_braced() {
        // SAFETY: serialized with other tests touching the environment
        unsafe {
            std::env::set_var("O2B_VAULT_ROOT", "/srv");
            std::env::set_var("O2B_BARE_NAME", "expanded");
        }
        let result = expand_env("${O2B_VAULT_ROOT}/$O2B_BARE_NAME/$$x", "wiki.path").unwrap();
        assert_eq!(result, "/srv/$O2B_BARE_NAME/$$x");
        unsafe {
            std::env::remove_var("O2B_VAULT_ROOT");
            std::env::remove_var("O2B_BARE_NAME");
        }
    }

    #[test]
    #[serial]
    fn test_expand_default_used_when_unset() {
        // SAFETY: serialized with other tests touching the environment
        unsafe {
            std::env::remove_var("O2B_UNSET_EXPAND");
        }
        let result = expand_env("${O2B_UNSET_EXPAND:-/vault}", "wiki.path").unwrap();
        assert_eq!(result, "/vault");
    }

    #[test]
    #[serial]
    fn test_expand_missing_var_names_field() {
        // SAFETY: serialized with other tests touching the environment
        unsafe {
            std::env::remove_var("O2B_MISSING_EXPAND");
        }
        let err = expand_env("${O2B_MISSING_EXPAND}/notes", "wiki.path").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("O2B_MISSING_EXPAND"));
        assert!(msg.contains("wiki.path"));
    }
}
