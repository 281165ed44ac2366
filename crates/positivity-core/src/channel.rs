//! Channel records consumed by the report transformer.
//!
//! These are the platform-neutral shapes the Twitch fetcher maps its Helix
//! responses into. They carry only what the report needs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category assigned to videos that carry no category name.
pub const DEFAULT_CATEGORY: &str = "Just Chatting";

/// Public profile of the channel a report is generated for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    pub user_id: String,
    pub login: String,
    pub display_name: String,
    pub profile_image_url: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Stream title from the channel record.
    #[serde(default)]
    pub title: Option<String>,
    /// Category last set on the channel, live or not.
    #[serde(default)]
    pub game_name: Option<String>,
}

impl ChannelInfo {
    /// The channel bio, treating an empty string the same as no bio.
    #[must_use]
    pub fn bio(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

/// A live broadcast. Absent (`None`) when the channel is offline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamStatus {
    pub viewer_count: u64,
    pub game_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub game_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Video {
    /// Category used for tallying; blank or missing names fall back to
    /// [`DEFAULT_CATEGORY`].
    #[must_use]
    pub fn category(&self) -> &str {
        self.game_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clip {
    #[serde(default)]
    pub view_count: u64,
}

/// Everything fetched for one report, in one place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelBundle {
    pub channel: ChannelInfo,
    pub followers: u64,
    pub stream: Option<StreamStatus>,
    pub videos: Vec<Video>,
    pub clips: Vec<Clip>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel_with_description(description: Option<&str>) -> ChannelInfo {
        ChannelInfo {
            user_id: "1".to_string(),
            login: "foo".to_string(),
            display_name: "Foo".to_string(),
            profile_image_url: "https://img.example/foo.png".to_string(),
            description: description.map(str::to_string),
            title: None,
            game_name: None,
        }
    }

    #[test]
    fn bio_is_none_for_empty_description() {
        assert_eq!(channel_with_description(Some("")).bio(), None);
        assert_eq!(channel_with_description(Some("   ")).bio(), None);
        assert_eq!(channel_with_description(None).bio(), None);
    }

    #[test]
    fn bio_returns_trimmed_description() {
        let channel = channel_with_description(Some("  speedruns and chill "));
        assert_eq!(channel.bio(), Some("speedruns and chill"));
    }

    #[test]
    fn video_category_falls_back_for_missing_or_blank_names() {
        let created_at = Utc::now();
        let missing = Video {
            view_count: 1,
            game_name: None,
            created_at,
        };
        let blank = Video {
            view_count: 1,
            game_name: Some(String::new()),
            created_at,
        };
        let named = Video {
            view_count: 1,
            game_name: Some("Celeste".to_string()),
            created_at,
        };
        assert_eq!(missing.category(), DEFAULT_CATEGORY);
        assert_eq!(blank.category(), DEFAULT_CATEGORY);
        assert_eq!(named.category(), "Celeste");
    }

    #[test]
    fn video_deserializes_without_optional_fields() {
        let video: Video =
            serde_json::from_str(r#"{"created_at":"2026-01-02T03:04:05Z"}"#).expect("video");
        assert_eq!(video.view_count, 0);
        assert!(video.game_name.is_none());
    }
}
