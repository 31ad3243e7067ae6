//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the Slotwise API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `STORE_BACKEND`: `postgres` (default) or `memory`
//! - `DATABASE_URL`: PostgreSQL connection string (required for the `postgres` backend)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `DEFAULT_CONSULTATION_MINUTES`: Slot length for sellers without a configured duration (default: 30)

use eyre::{Result, WrapErr, eyre};
use slotwise_core::slots::ConsultationDuration;
use std::env;
use tracing::Level;

/// Where consultation data lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres { database_url: String },
    /// Process-local storage, lost on restart.
    Memory,
}

/// Configuration for the Slotwise API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use slotwise_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// Storage backend for slots and bookings
    pub store: StoreBackend,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Fallback consultation duration
    pub default_duration: ConsultationDuration,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - `STORE_BACKEND` is `postgres` (or unset) and `DATABASE_URL` is not set
    /// - `STORE_BACKEND` names an unknown backend
    /// - `API_PORT` cannot be parsed as a u16
    /// - `DEFAULT_CONSULTATION_MINUTES` is not a valid duration
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Network settings
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("API_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Storage settings
        let store = match lookup("STORE_BACKEND").as_deref().unwrap_or("postgres") {
            "postgres" => StoreBackend::Postgres {
                database_url: lookup("DATABASE_URL")
                    .ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?,
            },
            "memory" => StoreBackend::Memory,
            other => return Err(eyre!("Unknown STORE_BACKEND: {}", other)),
        };

        // Logging settings
        let log_level = match lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = lookup("API_CORS_ORIGINS")
            .map(|origins| origins.split(',').map(|s| s.trim().to_string()).collect());

        // Performance settings
        let request_timeout = lookup("API_REQUEST_TIMEOUT_SECONDS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        // Booking settings
        let default_duration = match lookup("DEFAULT_CONSULTATION_MINUTES") {
            Some(value) => {
                let minutes: u32 = value
                    .parse()
                    .wrap_err("Invalid DEFAULT_CONSULTATION_MINUTES value")?;
                ConsultationDuration::from_minutes(minutes).map_err(|e| eyre!("{}", e))?
            }
            None => ConsultationDuration::default(),
        };

        Ok(Self {
            host,
            port,
            store,
            log_level,
            cors_origins,
            request_timeout,
            default_duration,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ApiConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_with_database_url() {
        let config = config(&[("DATABASE_URL", "postgres://localhost/slotwise")]).unwrap();

        assert_eq!(config.server_addr(), "0.0.0.0:3000");
        assert_eq!(
            config.store,
            StoreBackend::Postgres {
                database_url: "postgres://localhost/slotwise".to_string()
            }
        );
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.request_timeout, 30);
        assert_eq!(config.default_duration.minutes(), 30);
        assert!(config.cors_origins.is_none());
    }

    #[test]
    fn test_postgres_requires_database_url() {
        assert!(config(&[]).is_err());
    }

    #[test]
    fn test_memory_backend_and_overrides() {
        let config = config(&[
            ("STORE_BACKEND", "memory"),
            ("API_PORT", "8080"),
            ("LOG_LEVEL", "debug"),
            ("API_CORS_ORIGINS", "https://a.example, https://b.example"),
            ("DEFAULT_CONSULTATION_MINUTES", "45"),
        ])
        .unwrap();

        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(
            config.cors_origins,
            Some(vec!["https://a.example".to_string(), "https://b.example".to_string()])
        );
        assert_eq!(config.default_duration.minutes(), 45);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(config(&[("STORE_BACKEND", "redis")]).is_err());
        assert!(config(&[("STORE_BACKEND", "memory"), ("API_PORT", "http")]).is_err());
        assert!(config(&[("STORE_BACKEND", "memory"), ("DEFAULT_CONSULTATION_MINUTES", "0")]).is_err());
    }
}
