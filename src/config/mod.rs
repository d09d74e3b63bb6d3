//! Configuration module for reviewgate
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`REVIEWGATE_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use reviewgate::config::ReviewgateConfig;
//!
//! let toml = r#"
//! [server]
//! port = 9000
//!
//! [[businesses]]
//! name = "John's Cafe"
//! slug = "johns-cafe"
//! email = "owner@johnscafe.com"
//!
//! [[businesses.platforms]]
//! name = "Google Reviews"
//! url = "https://g.page/r/example"
//! weight = 100
//! "#;
//! let config: ReviewgateConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.server.port, 9000);
//! assert!(config.validate().is_ok());
//! ```

pub mod app;
pub mod business;
pub mod error;
pub mod logging;
pub mod routing;
pub mod server;

pub use app::AppConfig;
pub use business::BusinessConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use routing::{CursorWrite, RoutingConfig};
pub use server::ServerConfig;

use crate::routing::validate_platform_drafts;
use crate::store::is_valid_slug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Unified configuration for the reviewgate server.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReviewgateConfig {
    /// HTTP listener
    pub server: ServerConfig,
    /// Log level and format
    pub logging: LoggingConfig,
    /// Public link settings
    pub app: AppConfig,
    /// Platform selection behaviour
    pub routing: RoutingConfig,
    /// Businesses loaded into the store at startup
    pub businesses: Vec<BusinessConfig>,
}

impl ReviewgateConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply `REVIEWGATE_*` environment overrides.
    ///
    /// Unparseable values are ignored and the current value is kept.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(port) = env_parse("REVIEWGATE_PORT") {
            self.server.port = port;
        }
        if let Ok(host) = std::env::var("REVIEWGATE_HOST") {
            self.server.host = host;
        }
        if let Ok(level) = std::env::var("REVIEWGATE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = env_parse("REVIEWGATE_LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Ok(base_url) = std::env::var("REVIEWGATE_BASE_URL") {
            self.app.base_url = base_url;
        }
        if let Some(cursor_write) = env_parse("REVIEWGATE_CURSOR_WRITE") {
            self.routing.cursor_write = cursor_write;
        }
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(validation("server.port", "port must be non-zero"));
        }

        let base_url = self.app.base_url.as_str();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(validation(
                "app.base_url",
                "must be an absolute http(s) URL",
            ));
        }

        let mut slugs = HashSet::new();
        for (i, business) in self.businesses.iter().enumerate() {
            if business.name.trim().is_empty() {
                return Err(validation(
                    &format!("businesses[{}].name", i),
                    "name cannot be empty",
                ));
            }
            if business.email.trim().is_empty() {
                return Err(validation(
                    &format!("businesses[{}].email", i),
                    "email cannot be empty",
                ));
            }
            if !is_valid_slug(&business.slug) {
                return Err(validation(
                    &format!("businesses[{}].slug", i),
                    "slug must contain only lowercase letters, numbers, and hyphens",
                ));
            }
            if !slugs.insert(business.slug.as_str()) {
                return Err(validation(
                    &format!("businesses[{}].slug", i),
                    &format!("duplicate slug '{}'", business.slug),
                ));
            }
            if !business.platforms.is_empty() {
                validate_platform_drafts(&business.platforms).map_err(|e| {
                    validation(&format!("businesses[{}].platforms", i), &e.to_string())
                })?;
            }
        }

        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|value| value.parse().ok())
}

fn validation(field: &str, message: &str) -> ConfigError {
    ConfigError::Validation {
        field: field.to_string(),
        message: message.to_string(),
    }
}
