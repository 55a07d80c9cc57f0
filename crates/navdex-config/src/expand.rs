//! `${VAR}` expansion in path settings.

use std::env::{self, VarError};

use crate::ConfigError;

/// Substitute `${VAR}` and `${VAR:-default}` in `value` from the process
/// environment. Values without `${` are returned as is, so a lone `$` in a
/// path needs no escaping.
///
/// `field` names the setting in the error for an unset or non-UTF-8 variable.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| env::var(var).map(Some))
        .map(std::borrow::Cow::into_owned)
        .map_err(|err| {
            let reason = match err.cause {
                VarError::NotPresent => "not set",
                VarError::NotUnicode(_) => "not valid UTF-8",
            };
            ConfigError::EnvVar {
                field: field.to_owned(),
                message: format!("${{{}}} {reason}", err.var_name),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable name, so parallel tests do not race.
    const FIELD: &str = "index.source";

    #[test]
    fn test_expand_set_var() {
        // SAFETY: no other test touches this variable
        unsafe {
            env::set_var("NAVDEX_EXPAND_SET", "html");
        }

        let expanded = expand_env("${NAVDEX_EXPAND_SET}/index.js", FIELD).unwrap();

        assert_eq!(expanded, "html/index.js");
    }

    #[test]
    fn test_expand_default_for_unset_var() {
        // SAFETY: no other test touches this variable
        unsafe {
            env::remove_var("NAVDEX_EXPAND_DEFAULT");
        }

        let value = "${NAVDEX_EXPAND_DEFAULT:-build}/index.js";

        let expanded = expand_env(value, FIELD).unwrap();

        assert_eq!(expanded, "build/index.js");
    }

    #[test]
    fn test_expand_unset_var_names_field() {
        // SAFETY: no other test touches this variable
        unsafe {
            env::remove_var("NAVDEX_EXPAND_UNSET");
        }

        let err = expand_env("${NAVDEX_EXPAND_UNSET}", FIELD).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Environment variable error in index.source: ${NAVDEX_EXPAND_UNSET} not set"
        );
    }

    #[test]
    fn test_bare_dollar_is_literal() {
        let expanded = expand_env("$HOME/index.js", FIELD).unwrap();

        assert_eq!(expanded, "$HOME/index.js");
    }
}
