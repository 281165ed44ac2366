//! Shared types for the Twitch positivity report.
//!
//! Holds the application configuration, the channel records the fetcher
//! produces, and the pure transformer that turns them into a [`Report`].

pub mod app_config;
pub mod channel;
pub mod config;
pub mod metrics;
pub mod report;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use channel::{ChannelBundle, ChannelInfo, Clip, StreamStatus, Video};
pub use config::{load_app_config, load_app_config_from_env};
pub use report::{
    transform_channel_data, CommunitySection, ContentSection, GrowthSection, Report,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
