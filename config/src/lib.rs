//! # Configuration Management for userhaus
//!
//! This crate provides the centralized configuration structures for the
//! service: the HTTP listener settings and the SQLite connection/pool
//! settings.
//!
//! ## TOML File Configuration
//! ```toml
//! [http]
//! port = 8080
//! request_timeout_seconds = 10
//!
//! [database]
//! url = "sqlite::memory:"
//! min_connections = 1
//! max_connections = 5
//! connection_timeout_seconds = 30
//! idle_timeout_seconds = 600
//! max_lifetime_seconds = 3600
//! ```
//!
//! Load configuration:
//! ```rust,no_run
//! use config::AppConfig;
//!
//! fn main() -> Result<(), config::ConfigError> {
//!     // USERHAUS_CONFIG path, then ./userhaus.toml, then built-in defaults
//!     let config = AppConfig::load()?;
//!     println!("listening on port {}", config.http.port);
//!     Ok(())
//! }
//! ```
//!
//! Every setting has a default, so running without any configuration file is
//! supported; a file only needs the sections it wants to override.

use serde::{Deserialize, Serialize};
use std::{env, path::Path};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "./userhaus.toml";
const CONFIG_PATH_VAR: &str = "USERHAUS_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub port: u16,
    pub request_timeout_seconds: u64,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
    pub connection_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
    pub max_lifetime_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            request_timeout_seconds: 10,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            min_connections: 1,
            max_connections: 5,
            connection_timeout_seconds: 30,
            idle_timeout_seconds: 600,
            max_lifetime_seconds: 3600,
        }
    }
}

impl AppConfig {
    /// Load configuration from the TOML file named by `USERHAUS_CONFIG`,
    /// falling back to `./userhaus.toml`, falling back to built-in defaults.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is the normal case; only a malformed one is an error.
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(ConfigError::Dotenvy(err));
            }
        }

        let config = if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            Self::from_file(config_path)?
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        // HTTP validations
        if self.http.port == 0 {
            return Err(ConfigError::Invalid("HTTP port cannot be zero".to_string()));
        }
        if self.http.request_timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "HTTP request_timeout_seconds must be greater than 0".to_string(),
            ));
        }

        // Database validations
        if self.database.url.is_empty() {
            return Err(ConfigError::Invalid(
                "Database url cannot be empty".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "Database max_connections must be greater than 0".to_string(),
            ));
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::Invalid(
                "Database min_connections cannot be greater than max_connections".to_string(),
            ));
        }
        if self.database.connection_timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "Database connection_timeout_seconds must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl HttpConfig {
    /// Create a new HTTP configuration
    pub fn new(port: u16, request_timeout_seconds: u64) -> Self {
        Self {
            port,
            request_timeout_seconds,
        }
    }
}

impl DatabaseConfig {
    /// Create a new database configuration
    pub fn new(
        url: String,
        min_connections: u32,
        max_connections: u32,
        connection_timeout_seconds: u64,
        idle_timeout_seconds: u64,
        max_lifetime_seconds: u64,
    ) -> Self {
        Self {
            url,
            min_connections,
            max_connections,
            connection_timeout_seconds,
            idle_timeout_seconds,
            max_lifetime_seconds,
        }
    }

    /// Whether the URL names an in-memory SQLite database. Pool bootstrap
    /// treats these specially: the database only lives as long as its
    /// connections do.
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_file(name: &str, content: &str) -> std::path::PathBuf {
        let path = env::temp_dir().join(format!("userhaus-{}-{}", std::process::id(), name));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn defaults_pass_validation() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.http.port, 8080);
        assert!(config.database.is_in_memory());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_sections() {
        let path = temp_config_file("partial.toml", "[http]\nport = 9999\n");
        let config = AppConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.http.port, 9999);
        assert_eq!(config.http.request_timeout_seconds, 10);
        assert_eq!(config.database.url, "sqlite::memory:");
    }

    #[test]
    fn zero_port_is_rejected() {
        let path = temp_config_file("bad-port.toml", "[http]\nport = 0\n");
        let err = AppConfig::from_file(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn min_connections_above_max_is_rejected() {
        let path = temp_config_file(
            "bad-pool.toml",
            "[database]\nmin_connections = 10\nmax_connections = 2\n",
        );
        let err = AppConfig::from_file(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn file_database_urls_are_not_in_memory() {
        let mut config = DatabaseConfig::default();
        assert!(config.is_in_memory());

        config.url = "sqlite://userhaus.db".to_string();
        assert!(!config.is_in_memory());

        config.url = "sqlite:file:shared?mode=memory&cache=shared".to_string();
        assert!(config.is_in_memory());
    }
}
