//! Application settings loaded from the environment.

use serde::{Deserialize, Serialize};

/// Farm-wide settings, loaded once at startup and passed to every consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Telegram API ID (obtain from <https://my.telegram.org>).
    pub api_id: i32,

    /// Telegram API hash (obtain from <https://my.telegram.org>).
    pub api_hash: String,

    /// Referral code attached to new registrations.
    #[serde(default = "default_ref_id")]
    pub ref_id: String,

    /// Whether to read proxies from the proxies file.
    #[serde(default)]
    pub use_proxy_from_file: bool,
}

fn default_ref_id() -> String {
    "Jb9KqA".to_owned()
}

impl Settings {
    /// Creates settings with the documented defaults for optional fields.
    #[must_use]
    pub fn new(api_id: i32, api_hash: String) -> Self {
        Self {
            api_id,
            api_hash,
            ref_id: default_ref_id(),
            use_proxy_from_file: false,
        }
    }

    /// Creates settings from environment variables.
    ///
    /// Expects `API_ID` and `API_HASH` to be set. `REF_ID` and
    /// `USE_PROXY_FROM_FILE` are optional and take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_id: i32 = lookup("API_ID")
            .ok_or(ConfigError::MissingEnvVar("API_ID"))?
            .parse()
            .map_err(|_| ConfigError::InvalidApiId)?;

        let api_hash = lookup("API_HASH").ok_or(ConfigError::MissingEnvVar("API_HASH"))?;

        let ref_id = lookup("REF_ID").unwrap_or_else(default_ref_id);

        let use_proxy_from_file = match lookup("USE_PROXY_FROM_FILE") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidBool("USE_PROXY_FROM_FILE"))?,
            None => false,
        };

        Ok(Self {
            api_id,
            api_hash,
            ref_id,
            use_proxy_from_file,
        })
    }
}

/// Parses the usual environment spellings of a boolean.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid API ID format (must be an integer)")]
    InvalidApiId,

    #[error("Invalid boolean value for environment variable: {0}")]
    InvalidBool(&'static str),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    fn load(vars: &HashMap<String, String>) -> Result<Settings, ConfigError> {
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_required_fields_loaded() {
        let vars = env(&[("API_ID", "12345"), ("API_HASH", "abc123")]);
        let settings = load(&vars).unwrap();
        assert_eq!(settings.api_id, 12345);
        assert_eq!(settings.api_hash, "abc123");
        assert_eq!(settings.ref_id, "Jb9KqA");
        assert!(!settings.use_proxy_from_file);
    }

    #[test]
    fn test_missing_api_id_fails() {
        let vars = env(&[("API_HASH", "abc123")]);
        assert!(matches!(
            load(&vars),
            Err(ConfigError::MissingEnvVar("API_ID"))
        ));
    }

    #[test]
    fn test_missing_api_hash_fails() {
        let vars = env(&[("API_ID", "12345")]);
        assert!(matches!(
            load(&vars),
            Err(ConfigError::MissingEnvVar("API_HASH"))
        ));
    }

    #[test]
    fn test_invalid_api_id_fails() {
        let vars = env(&[("API_ID", "not-a-number"), ("API_HASH", "abc123")]);
        assert!(matches!(load(&vars), Err(ConfigError::InvalidApiId)));
    }

    #[test]
    fn test_optional_fields_override_defaults() {
        let vars = env(&[
            ("API_ID", "1"),
            ("API_HASH", "h"),
            ("REF_ID", "Xy12Ab"),
            ("USE_PROXY_FROM_FILE", "True"),
        ]);
        let settings = load(&vars).unwrap();
        assert_eq!(settings.ref_id, "Xy12Ab");
        assert!(settings.use_proxy_from_file);
    }

    #[test]
    fn test_invalid_bool_fails() {
        let vars = env(&[
            ("API_ID", "1"),
            ("API_HASH", "h"),
            ("USE_PROXY_FROM_FILE", "maybe"),
        ]);
        assert!(matches!(
            load(&vars),
            Err(ConfigError::InvalidBool("USE_PROXY_FROM_FILE"))
        ));
    }

    #[test]
    fn test_parse_bool_spellings() {
        assert_eq!(parse_bool("yes"), Some(true));
        assert_eq!(parse_bool("ON"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_settings_new_defaults() {
        let settings = Settings::new(12345, "abc123".to_owned());
        assert_eq!(settings.ref_id, "Jb9KqA");
        assert!(!settings.use_proxy_from_file);
    }
}
