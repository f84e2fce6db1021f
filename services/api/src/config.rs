//! Service configuration loaded from `APP_`-prefixed environment variables

use anyhow::Result;
use config::{Config, Environment};
use serde::Deserialize;

use crate::rate_limiter::RateLimiterConfig;

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// PostgreSQL, configured through `DATABASE_*` variables
    Postgres,
    /// Process-local storage, lost on restart
    Memory,
}

/// API service configuration
///
/// # Environment Variables
/// - `APP_HOST`: Bind address (default: "0.0.0.0")
/// - `APP_PORT`: Bind port (default: 8080)
/// - `APP_STORAGE`: `postgres` or `memory` (default: postgres)
/// - `APP_CORS_ORIGINS`: Comma-separated allowed origins (default: any)
/// - `APP_LOGIN_MAX_ATTEMPTS`: Failed logins before a ban (default: 5)
/// - `APP_LOGIN_WINDOW_SECONDS`: Failure counting window (default: 300)
/// - `APP_LOGIN_BAN_SECONDS`: Ban duration (default: 3600)
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    #[serde(default)]
    pub cors_origins: Vec<String>,
    pub login_max_attempts: u32,
    pub login_window_seconds: u64,
    pub login_ban_seconds: u64,
}

impl AppConfig {
    /// Load the configuration from the environment
    pub fn from_env() -> Result<Self> {
        let defaults = RateLimiterConfig::default();

        let settings = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080_i64)?
            .set_default("storage", "postgres")?
            .set_default("login_max_attempts", i64::from(defaults.max_attempts))?
            .set_default(
                "login_window_seconds",
                i64::try_from(defaults.window_seconds)?,
            )?
            .set_default(
                "login_ban_seconds",
                i64::try_from(defaults.ban_duration_seconds)?,
            )?
            .add_source(
                Environment::with_prefix("APP")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_origins"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Address the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Login throttling settings
    pub fn rate_limiter_config(&self) -> RateLimiterConfig {
        RateLimiterConfig {
            max_attempts: self.login_max_attempts,
            window_seconds: self.login_window_seconds,
            ban_duration_seconds: self.login_ban_seconds,
            ..RateLimiterConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 6] = [
        "APP_HOST",
        "APP_PORT",
        "APP_STORAGE",
        "APP_CORS_ORIGINS",
        "APP_LOGIN_MAX_ATTEMPTS",
        "APP_LOGIN_BAN_SECONDS",
    ];

    fn clear_env() {
        for var in VARS {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    #[serial]
    fn test_app_config_defaults() {
        clear_env();

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.rate_limiter_config(), RateLimiterConfig::default());
    }

    #[test]
    #[serial]
    fn test_app_config_from_env_with_custom_values() {
        clear_env();
        unsafe {
            std::env::set_var("APP_HOST", "127.0.0.1");
            std::env::set_var("APP_PORT", "9090");
            std::env::set_var("APP_STORAGE", "memory");
            std::env::set_var(
                "APP_CORS_ORIGINS",
                "http://localhost:3000,https://agri.example.com",
            );
            std::env::set_var("APP_LOGIN_MAX_ATTEMPTS", "3");
            std::env::set_var("APP_LOGIN_BAN_SECONDS", "60");
        }

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:9090");
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(
            config.cors_origins,
            vec![
                "http://localhost:3000".to_string(),
                "https://agri.example.com".to_string()
            ]
        );
        let limiter = config.rate_limiter_config();
        assert_eq!(limiter.max_attempts, 3);
        assert_eq!(limiter.window_seconds, 300);
        assert_eq!(limiter.ban_duration_seconds, 60);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_app_config_rejects_unknown_storage() {
        clear_env();
        unsafe {
            std::env::set_var("APP_STORAGE", "sqlite");
        }

        assert!(AppConfig::from_env().is_err());

        clear_env();
    }
}
