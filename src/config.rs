use crate::error::ConfigError;
use std::fmt;
use std::path::{Path, PathBuf};

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const MODEL_VAR: &str = "OPENAI_MODEL";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-1106";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Subdirectory, next to the input file, that receives annotated games.
pub const OUTPUT_DIR_NAME: &str = "Commentated_Games";

/// Settings for the commentary service.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
}

impl Config {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source. Blank values
    /// count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get(API_KEY_VAR).ok_or(ConfigError::MissingApiKey { var: API_KEY_VAR })?;

        Ok(Self {
            api_key: api_key.trim().to_string(),
            model: get(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: get(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        })
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        if let Some(model) = model {
            self.model = model;
        }
        self
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// `Commentated_Games/` in the directory holding `input`.
pub fn default_output_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .join(OUTPUT_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_missing_api_key_is_error() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingApiKey {
                var: "OPENAI_API_KEY"
            }
        ));
    }

    #[test]
    fn test_blank_api_key_is_error() {
        assert!(Config::from_lookup(lookup(&[(API_KEY_VAR, "  ")])).is_err());
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup(&[(API_KEY_VAR, "sk-test")])).unwrap();
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_env_overrides_and_cli_model() {
        let config = Config::from_lookup(lookup(&[
            (API_KEY_VAR, "sk-test"),
            (MODEL_VAR, "gpt-4o-mini"),
            (BASE_URL_VAR, "http://localhost:8080/v1"),
        ]))
        .unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.api_base, "http://localhost:8080/v1");

        let config = config.with_model(Some("other".to_string()));
        assert_eq!(config.model, "other");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config::from_lookup(lookup(&[(API_KEY_VAR, "sk-secret")])).unwrap();
        assert!(!format!("{config:?}").contains("sk-secret"));
    }

    #[test]
    fn test_default_output_dir_next_to_input() {
        assert_eq!(
            default_output_dir(Path::new("games/club/match.pgn")),
            PathBuf::from("games/club/Commentated_Games")
        );
        assert_eq!(
            default_output_dir(Path::new("match.pgn")),
            PathBuf::from("./Commentated_Games")
        );
    }
}
