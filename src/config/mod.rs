//! Application configuration module
//!
//! Configuration is read from environment variables (and a `.env` file in
//! development) with the `GYM_HOUSE` prefix; nested values use `__`.
//!
//! # Example
//!
//! ```no_run
//! use gym_house::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod server;

pub use auth::{AuthConfig, BootstrapAdmin};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Bind address, environment, logging and HTTP limits
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL connection, migrations and catalog seeding
    pub database: DatabaseConfig,

    /// Session signing, password hashing and the bootstrap admin
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// - `GYM_HOUSE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `GYM_HOUSE__DATABASE__URL=...` -> `database.url = ...`
    /// - `GYM_HOUSE__AUTH__JWT_SECRET=...` -> `auth.jwt_secret = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or a value
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("GYM_HOUSE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        Ok(())
    }

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

    // env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 6] = [
        "GYM_HOUSE__DATABASE__URL",
        "GYM_HOUSE__AUTH__JWT_SECRET",
        "GYM_HOUSE__SERVER__PORT",
        "GYM_HOUSE__SERVER__ENVIRONMENT",
        "GYM_HOUSE__DATABASE__SEED_CATALOG",
        "GYM_HOUSE__AUTH__TOKEN_TTL_SECS",
    ];

    fn set_minimal_env() {
        env::set_var("GYM_HOUSE__DATABASE__URL", "postgresql://gym@localhost/gym");
        env::set_var("GYM_HOUSE__AUTH__JWT_SECRET", "0123456789abcdef0123456789abcdef");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn load_with(extra: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        set_minimal_env();
        for (key, value) in extra {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_load_from_environment() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.database.url, "postgresql://gym@localhost/gym");
        assert_eq!(
            config.auth.jwt_secret.expose_secret(),
            "0123456789abcdef0123456789abcdef"
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert!(!config.database.seed_catalog);
    }

    #[test]
    fn test_nested_overrides() {
        let config = load_with(&[
            ("GYM_HOUSE__SERVER__PORT", "3000"),
            ("GYM_HOUSE__SERVER__ENVIRONMENT", "production"),
            ("GYM_HOUSE__DATABASE__SEED_CATALOG", "true"),
            ("GYM_HOUSE__AUTH__TOKEN_TTL_SECS", "600"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
        assert!(config.database.seed_catalog);
        assert_eq!(config.auth.token_ttl_secs, 600);
    }

    #[test]
    fn test_missing_secret_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        env::set_var("GYM_HOUSE__DATABASE__URL", "postgresql://gym@localhost/gym");
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_err());
    }
}
