//! # Configuration
//!
//! Layered settings for the address book server. Sources are merged in order:
//! built-in defaults, then `addressbook.toml` in the working directory (if it
//! exists), then `ADDRESSBOOK_*` environment variables. Nested keys use a
//! double underscore, e.g. `ADDRESSBOOK_SERVER__PORT=8081`.

use axum::http::HeaderValue;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "addressbook.toml";
pub const ENV_PREFIX: &str = "ADDRESSBOOK_";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Figment(#[from] Box<figment::Error>),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub pagination: PaginationConfig,
    /// Default `tracing` filter directive, overridden by `RUST_LOG`
    pub log_filter: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origin allowed to call the API from a browser
    pub cors_origin: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Requested page sizes above this are clamped
    pub max_page_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            pagination: PaginationConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_origin: "http://localhost:8080".to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:addressbook.db".to_string(),
            max_connections: 5,
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self { max_page_size: 100 }
    }
}

impl Config {
    /// Load and validate configuration from all sources
    pub fn load() -> Result<Self, ConfigError> {
        let config: Config = Self::figment().extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid(
                "server.port must be greater than 0".to_string(),
            ));
        }

        if self.server.cors_origin.parse::<HeaderValue>().is_err() {
            return Err(ConfigError::Invalid(format!(
                "server.cors_origin is not a valid header value: {}",
                self.server.cors_origin
            )));
        }

        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "database.url cannot be empty".to_string(),
            ));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be greater than 0".to_string(),
            ));
        }

        if self.pagination.max_page_size == 0 {
            return Err(ConfigError::Invalid(
                "pagination.max_page_size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.pagination.max_page_size, 100);
    }

    #[test]
    fn test_file_and_env_override_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                log_filter = "debug"

                [server]
                port = 8081
                "#,
            )?;
            jail.set_env("ADDRESSBOOK_DATABASE__MAX_CONNECTIONS", "2");
            jail.set_env("ADDRESSBOOK_PAGINATION__MAX_PAGE_SIZE", "25");

            let config = Config::load().map_err(|e| e.to_string())?;

            assert_eq!(config.server.port, 8081);
            assert_eq!(config.server.host, "127.0.0.1");
            assert_eq!(config.log_filter, "debug");
            assert_eq!(config.database.max_connections, 2);
            assert_eq!(config.database.url, "sqlite:addressbook.db");
            assert_eq!(config.pagination.max_page_size, 25);
            Ok(())
        });
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("ADDRESSBOOK_PAGINATION__MAX_PAGE_SIZE", "0");

            let result = Config::load();
            assert!(matches!(result, Err(ConfigError::Invalid(_))));
            Ok(())
        });
    }

    #[test]
    fn test_invalid_cors_origin_is_rejected() {
        let mut config = Config::default();
        config.server.cors_origin = "http://bad\norigin".to_string();

        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
