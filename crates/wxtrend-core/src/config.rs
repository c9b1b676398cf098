use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let database_url = require("DATABASE_URL")?;
    let secondary_database_url = require("WXTREND_SECONDARY_DATABASE_URL")?;

    let env = parse_environment(&or_default("WXTREND_ENV", "development"))?;

    let log_level = or_default("WXTREND_LOG_LEVEL", "info");
    let locations_path = PathBuf::from(or_default(
        "WXTREND_LOCATIONS_PATH",
        "./config/locations.yaml",
    ));

    let db_max_connections = parse_u32("WXTREND_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("WXTREND_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("WXTREND_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let collector_url = or_default("WXTREND_COLLECTOR_URL", "http://localhost:8088");
    let collector_timeout_secs = parse_u64("WXTREND_COLLECTOR_TIMEOUT_SECS", "30")?;
    let collector_user_agent =
        or_default("WXTREND_COLLECTOR_USER_AGENT", "wxtrend/0.1 (series-cache)");
    let collector_max_retries = parse_u32("WXTREND_COLLECTOR_MAX_RETRIES", "3")?;
    let collector_retry_backoff_base_ms =
        parse_u64("WXTREND_COLLECTOR_RETRY_BACKOFF_BASE_MS", "1000")?;

    Ok(AppConfig {
        database_url,
        secondary_database_url,
        env,
        log_level,
        locations_path,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        collector_url,
        collector_timeout_secs,
        collector_user_agent,
        collector_max_retries,
        collector_retry_backoff_base_ms,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "WXTREND_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
