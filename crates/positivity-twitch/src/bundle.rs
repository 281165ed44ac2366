//! Composite fetch of everything one report needs.

use positivity_core::{ChannelBundle, Clip, StreamStatus, Video};

use crate::client::TwitchClient;
use crate::error::TwitchError;
use crate::types::channel_info;

impl TwitchClient {
    /// Fetches channel info, follower total, live status, recent videos and
    /// recent clips for `username`.
    ///
    /// A fresh app token is acquired for every call. After the user lookup
    /// the remaining five reads run concurrently; the first failure fails the
    /// whole bundle.
    ///
    /// # Errors
    ///
    /// - [`TwitchError::ChannelNotFound`] if no user has this login.
    /// - [`TwitchError::Auth`] if the token grant returns no token.
    /// - [`TwitchError::Http`] on network failure or non-2xx status.
    /// - [`TwitchError::Deserialize`] if any response shape is unexpected.
    pub async fn fetch_channel_bundle(&self, username: &str) -> Result<ChannelBundle, TwitchError> {
        let login = username.trim().to_lowercase();
        let token = self.get_app_access_token().await?;

        let user = self
            .get_user_by_login(&token, &login)
            .await?
            .ok_or_else(|| TwitchError::ChannelNotFound(login.clone()))?;
        let user_id = user.id.clone();

        let (channel, followers, stream, videos, clips) = futures::try_join!(
            self.get_channel(&token, &user_id),
            self.get_follower_total(&token, &user_id),
            self.get_stream(&token, &user_id),
            self.get_videos(&token, &user_id, self.video_limit),
            self.get_clips(&token, &user_id, self.clip_limit),
        )?;

        tracing::info!(
            login = %login,
            user_id = %user_id,
            followers,
            live = stream.is_some(),
            videos = videos.len(),
            clips = clips.len(),
            "fetched Twitch channel bundle"
        );

        Ok(ChannelBundle {
            channel: channel_info(user, channel),
            followers,
            stream: stream.map(StreamStatus::from),
            videos: videos.into_iter().map(Video::from).collect(),
            clips: clips.into_iter().map(Clip::from).collect(),
        })
    }
}
