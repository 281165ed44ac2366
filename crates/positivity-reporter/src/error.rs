use positivity_db::DbError;
use positivity_twitch::TwitchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReporterError {
    #[error("twitch channel not found: {0}")]
    NotFound(String),

    #[error("invalid twitch username: {0:?}")]
    InvalidUsername(String),

    #[error("twitch request failed: {0}")]
    Source(TwitchError),

    #[error("report store failed: {0}")]
    Store(#[from] DbError),

    #[error("report serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<TwitchError> for ReporterError {
    fn from(err: TwitchError) -> Self {
        match err {
            TwitchError::ChannelNotFound(login) => Self::NotFound(login),
            other => Self::Source(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_not_found_maps_to_not_found() {
        let err = ReporterError::from(TwitchError::ChannelNotFound("ghost".to_string()));
        assert!(matches!(err, ReporterError::NotFound(ref login) if login == "ghost"));
    }

    #[test]
    fn other_twitch_errors_stay_source_errors() {
        let err = ReporterError::from(TwitchError::Auth("no token".to_string()));
        assert!(matches!(err, ReporterError::Source(TwitchError::Auth(_))));
        assert_eq!(err.to_string(), "twitch request failed: token grant failed: no token");
    }
}
