//! Runtime configuration read from the process environment.
//!
//! The API key is mandatory: without it no client can be built, so a missing
//! key fails here rather than on the first submission.

use std::time::Duration;

use zeroize::Zeroizing;

/// Primary and fallback variables holding the model API key.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_PRINT_COMMAND: &str = "lp";

/// Configuration errors. All of them are fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing credential: set {variable}")]
    MissingCredential { variable: &'static str },

    #[error("Invalid value for {variable}: {value:?}")]
    Invalid { variable: &'static str, value: String },
}

/// Secret API key. Wiped on drop and never printed.
#[derive(Clone)]
pub struct ApiKey(Zeroizing<String>);

impl ApiKey {
    /// Wrap a key, rejecting blank values.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingCredential` for an empty key.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = Zeroizing::new(key.into());
        if key.trim().is_empty() {
            return Err(ConfigError::MissingCredential {
                variable: API_KEY_VARS[0],
            });
        }
        Ok(Self(key))
    }

    /// Raw key, for the request header only.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.trim()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

/// Settings for the generative model endpoint.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub api_key: ApiKey,
    pub model: String,
    pub api_base: String,
    pub request_timeout: Duration,
}

/// Full application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model: ModelConfig,
    /// Host command that receives the rendered report on stdin.
    pub print_command: String,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingCredential` when no API key is set and
    /// `ConfigError::Invalid` for unparseable values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary lookup function.
    ///
    /// # Errors
    /// See [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let raw_key = API_KEY_VARS
            .iter()
            .find_map(|name| non_blank(*name))
            .ok_or(ConfigError::MissingCredential {
                variable: API_KEY_VARS[0],
            })?;
        let api_key = ApiKey::new(raw_key)?;

        let request_timeout = match non_blank("HEARTSENSE_REQUEST_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        variable: "HEARTSENSE_REQUEST_TIMEOUT_SECS",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        let model = ModelConfig {
            api_key,
            model: non_blank("HEARTSENSE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: non_blank("HEARTSENSE_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            request_timeout,
        };

        Ok(Self {
            model,
            print_command: non_blank("HEARTSENSE_PRINT_COMMAND")
                .unwrap_or_else(|| DEFAULT_PRINT_COMMAND.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_missing_key_is_fatal() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingCredential {
                variable: "GEMINI_API_KEY"
            }
        );

        let err = AppConfig::from_lookup(lookup_from(&[("GEMINI_API_KEY", "   ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential { .. }));
    }

    #[test]
    fn test_defaults() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("GEMINI_API_KEY", "test-key")])).expect("Config");
        assert_eq!(config.model.api_key.expose(), "test-key");
        assert_eq!(config.model.model, DEFAULT_MODEL);
        assert_eq!(config.model.api_base, DEFAULT_API_BASE);
        assert_eq!(config.model.request_timeout, Duration::from_secs(30));
        assert_eq!(config.print_command, "lp");
    }

    #[test]
    fn test_fallback_key_and_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("API_KEY", "fallback"),
            ("HEARTSENSE_MODEL", "gemini-2.5-pro"),
            ("HEARTSENSE_REQUEST_TIMEOUT_SECS", "5"),
            ("HEARTSENSE_PRINT_COMMAND", "lpr"),
        ]))
        .expect("Config");
        assert_eq!(config.model.api_key.expose(), "fallback");
        assert_eq!(config.model.model, "gemini-2.5-pro");
        assert_eq!(config.model.request_timeout, Duration::from_secs(5));
        assert_eq!(config.print_command, "lpr");
    }

    #[test]
    fn test_invalid_timeout() {
        for bad in ["0", "soon", "-3"] {
            let err = AppConfig::from_lookup(lookup_from(&[
                ("GEMINI_API_KEY", "k"),
                ("HEARTSENSE_REQUEST_TIMEOUT_SECS", bad),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { .. }));
        }
    }

    #[test]
    fn test_api_key_debug_is_redacted() {
        let key = ApiKey::new("AIzaSecretValue").expect("Key");
        assert_eq!(format!("{key:?}"), "ApiKey([REDACTED])");
    }
}
