use crate::api::endpoints::Platform;
use crate::error::AppError;
use std::env;

pub const DEFAULT_REGION: Platform = Platform::Na1;
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";

/// Process-wide settings, loaded once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct Config {
    pub riot_api_key: String,
    pub openai_api_key: String,
    pub region: Platform,
    pub openai_model: String,
    pub bind_address: String,
    /// Overrides every Riot host (platform and regional) when set.
    pub riot_base_url: Option<String>,
    pub openai_base_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| AppError::ConfigError(format!("{} is not set", key)))
        };

        let riot_api_key = required("RIOT_API_KEY")?;
        let openai_api_key = required("OPENAI_API_KEY")?;

        let region = match lookup("RIOT_REGION").filter(|value| !value.trim().is_empty()) {
            Some(code) => Platform::from_code(&code).ok_or_else(|| {
                AppError::ConfigError(format!("RIOT_REGION '{}' is not a known region code", code))
            })?,
            None => DEFAULT_REGION,
        };
        let openai_model =
            lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string());
        let bind_address =
            lookup("RIFT_COACH_BIND").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        Ok(Config {
            riot_api_key,
            openai_api_key,
            region,
            openai_model,
            bind_address,
            riot_base_url: lookup("RIOT_API_BASE_URL"),
            openai_base_url: lookup("OPENAI_API_BASE_URL"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn missing_riot_key_is_fatal() {
        let err = Config::from_lookup(lookup_from(&[("OPENAI_API_KEY", "sk-test")])).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(ref msg) if msg.contains("RIOT_API_KEY")));
    }

    #[test]
    fn blank_openai_key_is_fatal() {
        let err = Config::from_lookup(lookup_from(&[
            ("RIOT_API_KEY", "RGAPI-test"),
            ("OPENAI_API_KEY", "  "),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::ConfigError(ref msg) if msg.contains("OPENAI_API_KEY")));
    }

    #[test]
    fn defaults_fill_optional_settings() {
        let config = Config::from_lookup(lookup_from(&[
            ("RIOT_API_KEY", "RGAPI-test"),
            ("OPENAI_API_KEY", "sk-test"),
            ("RIOT_REGION", "EUW1"),
        ]))
        .unwrap();

        assert_eq!(config.region, Platform::Euw1);
        assert_eq!(config.openai_model, DEFAULT_OPENAI_MODEL);
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert!(config.riot_base_url.is_none());
    }

    #[test]
    fn unknown_region_is_fatal() {
        let err = Config::from_lookup(lookup_from(&[
            ("RIOT_API_KEY", "RGAPI-test"),
            ("OPENAI_API_KEY", "sk-test"),
            ("RIOT_REGION", "evil.example/x#"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::ConfigError(ref msg) if msg.contains("RIOT_REGION")));
    }

    #[test]
    fn missing_region_uses_default() {
        let config = Config::from_lookup(lookup_from(&[
            ("RIOT_API_KEY", "RGAPI-test"),
            ("OPENAI_API_KEY", "sk-test"),
        ]))
        .unwrap();
        assert_eq!(config.region, DEFAULT_REGION);
    }
}
