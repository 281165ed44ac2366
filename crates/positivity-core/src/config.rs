use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Helix caps `first` at 100 for both `/videos` and `/clips`.
const HELIX_MAX_PAGE_SIZE: u32 = 100;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can feed a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_page_size = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let value = parse_u32(var, default)?;
        if value == 0 || value > HELIX_MAX_PAGE_SIZE {
            return Err(invalid(
                var,
                format!("must be between 1 and {HELIX_MAX_PAGE_SIZE}, got {value}"),
            ));
        }
        Ok(value)
    };

    let twitch_client_id = optional("TWITCH_CLIENT_ID");
    let twitch_client_secret = optional("TWITCH_CLIENT_SECRET");
    let database_url = optional("DATABASE_URL");

    let env = parse_environment(&or_default("POSITIVITY_ENV", "development"))?;

    let bind_addr = parse_addr("POSITIVITY_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("POSITIVITY_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("POSITIVITY_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("POSITIVITY_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("POSITIVITY_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let twitch_timeout_secs = parse_u64("POSITIVITY_TWITCH_TIMEOUT_SECS", "30")?;
    let video_limit = parse_page_size("POSITIVITY_VIDEO_LIMIT", "10")?;
    let clip_limit = parse_page_size("POSITIVITY_CLIP_LIMIT", "20")?;

    let report_ttl_hours = or_default("POSITIVITY_REPORT_TTL_HOURS", "24")
        .parse::<i32>()
        .map_err(|e| invalid("POSITIVITY_REPORT_TTL_HOURS", e.to_string()))?;
    if report_ttl_hours <= 0 {
        return Err(invalid(
            "POSITIVITY_REPORT_TTL_HOURS",
            format!("must be positive, got {report_ttl_hours}"),
        ));
    }

    let cleanup_cron = or_default("POSITIVITY_CLEANUP_CRON", "0 0 * * * *");

    Ok(AppConfig {
        twitch_client_id,
        twitch_client_secret,
        database_url,
        env,
        bind_addr,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        twitch_timeout_secs,
        video_limit,
        clip_limit,
        report_ttl_hours,
        cleanup_cron,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "POSITIVITY_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
