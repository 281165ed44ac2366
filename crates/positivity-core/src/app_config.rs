use std::net::SocketAddr;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub twitch_client_id: Option<String>,
    pub twitch_client_secret: Option<String>,
    pub database_url: Option<String>,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub twitch_timeout_secs: u64,
    /// Number of recent videos requested per report (Helix `first`).
    pub video_limit: u32,
    /// Number of recent clips requested per report (Helix `first`).
    pub clip_limit: u32,
    pub report_ttl_hours: i32,
    pub cleanup_cron: String,
}

impl AppConfig {
    /// Returns the Twitch client id and secret.
    ///
    /// Only commands that call Twitch need them; database maintenance runs
    /// without credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] naming the first unset variable.
    pub fn twitch_credentials(&self) -> Result<(&str, &str), ConfigError> {
        let id = self
            .twitch_client_id
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("TWITCH_CLIENT_ID".to_string()))?;
        let secret = self
            .twitch_client_secret
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("TWITCH_CLIENT_SECRET".to_string()))?;
        Ok((id, secret))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("twitch_client_id", &self.twitch_client_id)
            .field(
                "twitch_client_secret",
                &self.twitch_client_secret.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("twitch_timeout_secs", &self.twitch_timeout_secs)
            .field("video_limit", &self.video_limit)
            .field("clip_limit", &self.clip_limit)
            .field("report_ttl_hours", &self.report_ttl_hours)
            .field("cleanup_cron", &self.cleanup_cron)
            .finish()
    }
}
