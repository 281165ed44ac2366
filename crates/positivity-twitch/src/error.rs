use thiserror::Error;

/// Errors returned by the Twitch Helix client.
#[derive(Debug, Error)]
pub enum TwitchError {
    /// Network or TLS failure, or a non-2xx status from Twitch.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// `/users?login=` matched no account.
    #[error("channel not found: {0}")]
    ChannelNotFound(String),

    /// The token endpoint answered without a usable access token.
    #[error("token grant failed: {0}")]
    Auth(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Credentials are missing from the environment.
    #[error(transparent)]
    Config(#[from] positivity_core::ConfigError),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}
