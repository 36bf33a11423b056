use crate::client::DEFAULT_BASE_URL;
use anyhow::{bail, Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub host: String,
    pub port: u16,

    // Upstream API
    pub api_base_url: String,
    pub api_key: Option<String>,
    pub request_timeout_secs: Option<u64>,

    // History
    pub retain_history_on_key_change: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            host: "0.0.0.0".to_string(),
            port: 8080,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            request_timeout_secs: None,
            retain_history_on_key_change: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let environment = Self::parse_environment()?;

        let config = Self {
            environment,
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid PORT")?,

            api_base_url: std::env::var("API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            api_key: std::env::var("API_KEY").ok().filter(|k| !k.trim().is_empty()),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("Invalid REQUEST_TIMEOUT_SECS")?,

            retain_history_on_key_change: parse_bool(
                &std::env::var("RETAIN_HISTORY_ON_KEY_CHANGE")
                    .unwrap_or_else(|_| "false".to_string()),
            )
            .context("Invalid RETAIN_HISTORY_ON_KEY_CHANGE")?,
        };

        config.validate()?;
        Ok(config)
    }

    fn parse_environment() -> Result<Environment> {
        let env = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        environment_from_str(&env)
    }

    pub fn validate(&self) -> Result<()> {
        // reqwest only speaks http(s)
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            bail!("API_BASE_URL must be HTTP(S) URL");
        }
        if self.api_base_url.ends_with('/') {
            bail!("API_BASE_URL must not end with '/', endpoints start with one");
        }
        if self.request_timeout_secs == Some(0) {
            bail!("REQUEST_TIMEOUT_SECS must be greater than 0");
        }

        tracing::info!(
            "Configuration validated for {:?} environment",
            self.environment
        );

        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn environment_from_str(env: &str) -> Result<Environment> {
    match env.to_lowercase().as_str() {
        "development" | "dev" => Ok(Environment::Development),
        "staging" | "stage" | "test" => Ok(Environment::Staging),
        "production" | "prod" => Ok(Environment::Production),
        _ => bail!("Unknown environment: {}", env),
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("Expected a boolean, got {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api_base_url, "https://pierdun.com/public/api/v1");
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn rejects_non_http_base_url() {
        let config = Config {
            api_base_url: "ftp://example.com".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_trailing_slash_and_zero_timeout() {
        let slash = Config {
            api_base_url: "https://example.com/api/".to_string(),
            ..Config::default()
        };
        let zero = Config {
            request_timeout_secs: Some(0),
            ..Config::default()
        };
        assert!(slash.validate().is_err());
        assert!(zero.validate().is_err());
    }

    #[test]
    fn parses_environment_aliases() {
        assert_eq!(environment_from_str("DEV").unwrap(), Environment::Development);
        assert_eq!(environment_from_str("prod").unwrap(), Environment::Production);
        assert_eq!(environment_from_str("stage").unwrap(), Environment::Staging);
        assert!(environment_from_str("moon").is_err());
    }

    #[test]
    fn parses_booleans() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool(" YES ").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(!parse_bool("").unwrap());
        assert!(parse_bool("maybe").is_err());
    }
}
