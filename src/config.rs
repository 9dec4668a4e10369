//! Dispatch options for the [`Router`](crate::Router).

use serde::Deserialize;
use thiserror::Error;

/// Switches controlling how the router answers requests that don't match a
/// route exactly. Every switch is enabled by default.
///
/// ```rust
/// use radixmux::Config;
///
/// let config = Config::from_toml("redirect_fixed_path = false").unwrap();
/// assert!(!config.redirect_fixed_path);
/// assert!(config.redirect_trailing_slash);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Redirect to the same path with (without) a trailing slash when only
    /// that variant is registered.
    pub redirect_trailing_slash: bool,
    /// Redirect to the cleaned path when it resolves and the requested one
    /// does not.
    pub redirect_fixed_path: bool,
    /// Answer with 405 when the path is registered for other methods.
    pub handle_method_not_allowed: bool,
    /// Answer `OPTIONS` requests automatically.
    pub handle_options: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            redirect_trailing_slash: true,
            redirect_fixed_path: true,
            handle_method_not_allowed: true,
            handle_options: true,
        }
    }
}

/// Error returned when a configuration document can't be parsed.
#[derive(Debug, Error)]
#[error("invalid router configuration: {0}")]
pub struct ConfigError(#[from] toml::de::Error);

impl Config {
    /// Parses a TOML document. Missing keys keep their default value.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_all_switches() {
        let config = Config::from_toml(
            r#"
            redirect_trailing_slash = false
            redirect_fixed_path = false
            handle_method_not_allowed = false
            handle_options = false
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            Config {
                redirect_trailing_slash: false,
                redirect_fixed_path: false,
                handle_method_not_allowed: false,
                handle_options: false,
            }
        );
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let err = Config::from_toml("handle_options = \"yes\"").unwrap_err();
        assert!(err.to_string().starts_with("invalid router configuration"));
    }
}
