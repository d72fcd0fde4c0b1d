//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `CLASS_PORTAL` prefix
//! and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use class_portal::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod server;

pub use auth::{AuthConfig, MIN_SECRET_BYTES};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL connection and pool
    pub database: DatabaseConfig,

    /// Session-token verification and service key
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads `CLASS_PORTAL__*` variables:
    ///
    /// - `CLASS_PORTAL__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CLASS_PORTAL__DATABASE__URL=...` -> `database.url = ...`
    /// - `CLASS_PORTAL__AUTH__JWT_SECRET=...` -> `auth.jwt_secret = ...`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CLASS_PORTAL")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global; serialize the tests that touch them.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "CLASS_PORTAL__DATABASE__URL",
        "CLASS_PORTAL__AUTH__JWT_SECRET",
        "CLASS_PORTAL__AUTH__SERVICE_KEY",
        "CLASS_PORTAL__AUTH__ISSUER",
        "CLASS_PORTAL__SERVER__PORT",
        "CLASS_PORTAL__SERVER__ENVIRONMENT",
    ];

    fn set_minimal_env() {
        env::set_var("CLASS_PORTAL__DATABASE__URL", "postgresql://test@localhost/test");
        env::set_var("CLASS_PORTAL__AUTH__JWT_SECRET", "0123456789abcdef0123456789abcdef");
        env::set_var("CLASS_PORTAL__AUTH__SERVICE_KEY", "fedcba9876543210fedcba9876543210");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn load_with(extra: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        set_minimal_env();
        for (k, v) in extra {
            env::set_var(k, v);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_load_from_environment() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/test");
        assert_eq!(config.auth.audience, "authenticated");
        assert_eq!(
            config.auth.service_key.expose_secret(),
            "fedcba9876543210fedcba9876543210"
        );
    }

    #[test]
    fn test_validate_full_config() {
        let config = load_with(&[]).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_overrides() {
        let config = load_with(&[
            ("CLASS_PORTAL__SERVER__PORT", "3000"),
            ("CLASS_PORTAL__SERVER__ENVIRONMENT", "production"),
            ("CLASS_PORTAL__AUTH__ISSUER", "https://auth.school.test"),
        ])
        .unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
        assert_eq!(config.auth.issuer.as_deref(), Some("https://auth.school.test"));
    }
}
