//! Application configuration loaded from environment variables.

use std::str::FromStr;
use std::time::Duration;

use signup_infra::database::DatabaseConfig;
use signup_infra::mail::SendGridConfig;
use signup_infra::rate_limit::RateLimitConfig;

pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has an invalid value: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Deployment environment name (`APP_ENV`), echoed by `/health`.
    pub environment: String,
    pub database: DatabaseConfig,
    pub run_migrations: bool,
    /// Value of `ALLOWED_ORIGIN`; also drives the competition origin check.
    pub allowed_origin: Option<String>,
    pub rate_limit: RateLimitConfig,
    pub redis_url: Option<String>,
    /// Present only when both the SendGrid key and sender are configured.
    pub sendgrid: Option<SendGridConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut database =
            DatabaseConfig::new(var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?);
        database.max_connections =
            parse_or("DB_MAX_CONNECTIONS", var("DB_MAX_CONNECTIONS"), database.max_connections)?;
        database.min_connections =
            parse_or("DB_MIN_CONNECTIONS", var("DB_MIN_CONNECTIONS"), database.min_connections)?;

        let limits = RateLimitConfig::default();
        let rate_limit = RateLimitConfig {
            max_requests: parse_or(
                "RATE_LIMIT_MAX_REQUESTS",
                var("RATE_LIMIT_MAX_REQUESTS"),
                limits.max_requests,
            )?,
            window: Duration::from_millis(parse_or(
                "RATE_LIMIT_WINDOW_MS",
                var("RATE_LIMIT_WINDOW_MS"),
                limits.window.as_millis() as u64,
            )?),
        };

        let sendgrid = match (var("SENDGRID_API_KEY"), var("SENDGRID_FROM_EMAIL")) {
            (Some(api_key), Some(from_email)) => {
                let config = SendGridConfig::new(api_key, from_email);
                Some(match var("SENDGRID_FROM_NAME") {
                    Some(name) => config.with_from_name(name),
                    None => config,
                })
            }
            _ => None,
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or("PORT", var("PORT"), 3001)?,
            environment: var("APP_ENV").unwrap_or_else(|| "development".to_string()),
            database,
            run_migrations: parse_flag("RUN_MIGRATIONS", var("RUN_MIGRATIONS"), true)?,
            allowed_origin: var("ALLOWED_ORIGIN"),
            rate_limit,
            redis_url: var("REDIS_URL"),
            sendgrid,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// Origin the CORS layer accepts.
    pub fn cors_origin(&self) -> &str {
        self.allowed_origin.as_deref().unwrap_or(DEFAULT_CORS_ORIGIN)
    }
}

fn parse_or<T: FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            var: name,
            value: raw,
        }),
    }
}

fn parse_flag(name: &'static str, value: Option<String>, default: bool) -> Result<bool, ConfigError> {
    match value.as_deref().map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) if matches!(v.as_str(), "true" | "1" | "yes") => Ok(true),
        Some(v) if matches!(v.as_str(), "false" | "0" | "no") => Ok(false),
        Some(_) => Err(ConfigError::Invalid {
            var: name,
            value: value.unwrap_or_default(),
        }),
    }
}
