//! Twitch Helix response types.
//!
//! Helix wraps list endpoints in `{"data": [...]}`; [`HelixResponse`] captures
//! that envelope. Only the fields the report uses are modelled; everything
//! else in the payload is ignored.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use positivity_core::{ChannelInfo, Clip, StreamStatus, Video};

/// `{"data": [...]}` envelope shared by the Helix list endpoints.
#[derive(Debug, Deserialize)]
pub struct HelixResponse<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Response of the OAuth client-credentials grant.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default)]
    pub token_type: String,
}

/// App access token used as the bearer credential for Helix reads.
///
/// The expiry is kept for logging only; tokens are not reused across reports.
#[derive(Clone)]
pub struct AppAccessToken {
    pub access_token: String,
    pub expires_in: u64,
}

impl std::fmt::Debug for AppAccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppAccessToken")
            .field("access_token", &"[redacted]")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// /users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct HelixUser {
    pub id: String,
    pub login: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub profile_image_url: String,
}

// ---------------------------------------------------------------------------
// /channels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct HelixChannel {
    pub broadcaster_id: String,
    #[serde(default)]
    pub game_name: String,
    #[serde(default)]
    pub title: String,
}

// ---------------------------------------------------------------------------
// /channels/followers
// ---------------------------------------------------------------------------

/// Only `total` is read; the follower list itself needs a user token.
#[derive(Debug, Deserialize)]
pub struct FollowersResponse {
    #[serde(default)]
    pub total: u64,
}

// ---------------------------------------------------------------------------
// /streams
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct HelixStream {
    pub user_id: String,
    #[serde(default)]
    pub game_name: String,
    #[serde(default)]
    pub viewer_count: u64,
}

// ---------------------------------------------------------------------------
// /videos
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct HelixVideo {
    pub id: String,
    #[serde(default)]
    pub view_count: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub game_name: Option<String>,
}

// ---------------------------------------------------------------------------
// /clips
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct HelixClip {
    pub id: String,
    #[serde(default)]
    pub view_count: u64,
}

// ---------------------------------------------------------------------------
// Conversions into report inputs
// ---------------------------------------------------------------------------

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Merge the user record with its channel record, when Helix returned one.
#[must_use]
pub fn channel_info(user: HelixUser, channel: Option<HelixChannel>) -> ChannelInfo {
    let (title, game_name) = channel.map_or((None, None), |c| {
        (non_empty(c.title), non_empty(c.game_name))
    });

    ChannelInfo {
        user_id: user.id,
        login: user.login,
        display_name: user.display_name,
        profile_image_url: user.profile_image_url,
        description: non_empty(user.description),
        title,
        game_name,
    }
}

impl From<HelixStream> for StreamStatus {
    fn from(stream: HelixStream) -> Self {
        Self {
            viewer_count: stream.viewer_count,
            game_name: stream.game_name,
        }
    }
}

impl From<HelixVideo> for Video {
    fn from(video: HelixVideo) -> Self {
        Self {
            view_count: video.view_count,
            game_name: video.game_name.and_then(non_empty),
            created_at: video.created_at,
        }
    }
}

impl From<HelixClip> for Clip {
    fn from(clip: HelixClip) -> Self {
        Self {
            view_count: clip.view_count,
        }
    }
}
