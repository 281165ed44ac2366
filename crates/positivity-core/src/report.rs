//! The positivity report and the transformer that builds it.
//!
//! [`transform_channel_data`] is pure: given the same channel records and the
//! same `now`, it returns the same report. The descriptive strings are fixed
//! copy and do not depend on the metric values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::channel::{ChannelBundle, ChannelInfo, Clip, StreamStatus, Video};
use crate::metrics;

pub const DEFAULT_DESCRIPTION: &str = "A unique creator with a story to tell";

pub const ENGAGEMENT_TEXT: &str = "Your content creates meaningful connections";
pub const LOYALTY_TEXT: &str = "You've built a dedicated community that returns to your content";
pub const VIEWER_TEXT: &str = "Your content brings people together";
pub const CATEGORY_TEXT: &str = "You've found your creative niche";
pub const VIEWS_TEXT: &str = "People are discovering your unique content";
pub const CLIP_TEXT: &str = "Your memorable moments are being shared";
pub const RETURN_TEXT: &str = "Your content keeps viewers coming back for more";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub username: String,
    pub profile_image: String,
    pub description: String,
    pub community: CommunitySection,
    pub content: ContentSection,
    pub growth: GrowthSection,
    pub is_live: bool,
    pub current_viewers: u64,
    pub current_game: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunitySection {
    pub followers: u64,
    pub follower_text: String,
    /// Percentage in `[0, 100]`, one decimal place.
    pub engagement_rate: f64,
    pub engagement_text: String,
    /// Integer score in `[0, 100]`.
    pub loyalty_score: u32,
    pub loyalty_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSection {
    pub total_streams: usize,
    pub total_stream_text: String,
    pub average_viewers: u64,
    pub viewer_text: String,
    pub popular_category: String,
    pub category_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthSection {
    pub recent_views: u64,
    pub views_text: String,
    pub clip_views: u64,
    pub clip_text: String,
    /// Integer in `[65, 95]`, or 70 when fewer than three videos exist.
    pub return_rate: u32,
    pub return_text: String,
}

/// Build a report from already-fetched channel records.
///
/// `now` anchors the 30-day window used for recent views; it is the only
/// time input.
#[must_use]
pub fn transform_channel_data(
    channel: &ChannelInfo,
    followers: u64,
    stream: Option<&StreamStatus>,
    videos: &[Video],
    clips: &[Clip],
    now: DateTime<Utc>,
) -> Report {
    Report {
        username: channel.display_name.clone(),
        profile_image: channel.profile_image_url.clone(),
        description: channel
            .bio()
            .unwrap_or(DEFAULT_DESCRIPTION)
            .to_string(),

        community: CommunitySection {
            followers,
            follower_text: metrics::follower_text(followers),
            engagement_rate: metrics::engagement_rate(videos, followers),
            engagement_text: ENGAGEMENT_TEXT.to_string(),
            loyalty_score: metrics::loyalty_score(videos),
            loyalty_text: LOYALTY_TEXT.to_string(),
        },

        content: ContentSection {
            total_streams: videos.len(),
            total_stream_text: format!(
                "You've shared {} experiences with your community",
                videos.len()
            ),
            average_viewers: metrics::average_viewers(videos),
            viewer_text: VIEWER_TEXT.to_string(),
            popular_category: metrics::popular_category(videos),
            category_text: CATEGORY_TEXT.to_string(),
        },

        growth: GrowthSection {
            recent_views: metrics::recent_views(videos, now),
            views_text: VIEWS_TEXT.to_string(),
            clip_views: metrics::total_clip_views(clips),
            clip_text: CLIP_TEXT.to_string(),
            return_rate: metrics::return_rate(videos),
            return_text: RETURN_TEXT.to_string(),
        },

        is_live: stream.is_some(),
        current_viewers: stream.map_or(0, |s| s.viewer_count),
        current_game: stream.map(|s| s.game_name.clone()),
    }
}

impl Report {
    /// Build a report from a fetched [`ChannelBundle`].
    #[must_use]
    pub fn from_bundle(bundle: &ChannelBundle, now: DateTime<Utc>) -> Self {
        transform_channel_data(
            &bundle.channel,
            bundle.followers,
            bundle.stream.as_ref(),
            &bundle.videos,
            &bundle.clips,
            now,
        )
    }
}
