//! HTTP client for the Twitch Helix API.
//!
//! Wraps `reqwest` with the client-credentials token grant, the `Client-Id`
//! and bearer headers Helix requires, and typed response deserialization.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use positivity_core::AppConfig;

use crate::error::TwitchError;
use crate::types::{
    AppAccessToken, FollowersResponse, HelixChannel, HelixClip, HelixResponse, HelixStream,
    HelixUser, HelixVideo, TokenResponse,
};

const DEFAULT_API_BASE_URL: &str = "https://api.twitch.tv/helix/";
const DEFAULT_TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";
const DEFAULT_VIDEO_LIMIT: u32 = 10;
const DEFAULT_CLIP_LIMIT: u32 = 20;

/// Client for the Twitch Helix API.
///
/// Use [`TwitchClient::new`] for production or [`TwitchClient::with_base_urls`]
/// to point at a mock server in tests.
pub struct TwitchClient {
    client: Client,
    client_id: String,
    client_secret: String,
    api_base: Url,
    token_url: Url,
    pub(crate) video_limit: u32,
    pub(crate) clip_limit: u32,
}

impl TwitchClient {
    /// Creates a client pointed at the production Twitch endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`TwitchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        client_id: &str,
        client_secret: &str,
        timeout_secs: u64,
    ) -> Result<Self, TwitchError> {
        Self::with_base_urls(
            client_id,
            client_secret,
            timeout_secs,
            DEFAULT_API_BASE_URL,
            DEFAULT_TOKEN_URL,
        )
    }

    /// Creates a client with custom Helix and token URLs (for wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`TwitchError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`TwitchError::InvalidUrl`] if either URL does not parse.
    pub fn with_base_urls(
        client_id: &str,
        client_secret: &str,
        timeout_secs: u64,
        api_base_url: &str,
        token_url: &str,
    ) -> Result<Self, TwitchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("twitch-positivity/0.1 (channel-report)")
            .build()?;

        // Exactly one trailing slash so `Url::join` appends endpoint paths
        // instead of replacing the last segment.
        let normalised = format!("{}/", api_base_url.trim_end_matches('/'));
        let api_base = Url::parse(&normalised)
            .map_err(|e| TwitchError::InvalidUrl(format!("'{api_base_url}': {e}")))?;
        let token_url = Url::parse(token_url)
            .map_err(|e| TwitchError::InvalidUrl(format!("'{token_url}': {e}")))?;

        Ok(Self {
            client,
            client_id: client_id.to_owned(),
            client_secret: client_secret.to_owned(),
            api_base,
            token_url,
            video_limit: DEFAULT_VIDEO_LIMIT,
            clip_limit: DEFAULT_CLIP_LIMIT,
        })
    }

    /// Creates a production client from the loaded application config.
    ///
    /// # Errors
    ///
    /// Returns [`TwitchError::Config`] if the Twitch credentials are not set,
    /// or [`TwitchError::Http`] if the `reqwest::Client` cannot be built.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, TwitchError> {
        let (client_id, client_secret) = config.twitch_credentials()?;
        Ok(Self::new(client_id, client_secret, config.twitch_timeout_secs)?
            .with_limits(config.video_limit, config.clip_limit))
    }

    /// Overrides how many recent videos and clips a bundle requests.
    #[must_use]
    pub fn with_limits(mut self, video_limit: u32, clip_limit: u32) -> Self {
        self.video_limit = video_limit;
        self.clip_limit = clip_limit;
        self
    }

    /// Exchanges the client credentials for an app access token.
    ///
    /// # Errors
    ///
    /// - [`TwitchError::Http`] on network failure or non-2xx status.
    /// - [`TwitchError::Deserialize`] if the body is not the expected JSON.
    /// - [`TwitchError::Auth`] if the response carries an empty token.
    pub async fn get_app_access_token(&self) -> Result<AppAccessToken, TwitchError> {
        let mut url = self.token_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("client_secret", &self.client_secret)
            .append_pair("grant_type", "client_credentials");

        let response = self.client.post(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| TwitchError::Deserialize {
                context: "oauth2/token".to_string(),
                source: e,
            })?;

        if token.access_token.is_empty() {
            return Err(TwitchError::Auth(
                "token endpoint returned no access_token".to_string(),
            ));
        }

        tracing::debug!(
            expires_in = token.expires_in,
            token_type = %token.token_type,
            "acquired Twitch app access token"
        );

        Ok(AppAccessToken {
            access_token: token.access_token,
            expires_in: token.expires_in,
        })
    }

    /// Resolves a login name to its user record; `None` when no user matches.
    ///
    /// # Errors
    ///
    /// - [`TwitchError::Http`] on network failure or non-2xx status.
    /// - [`TwitchError::Deserialize`] if the response shape is unexpected.
    pub async fn get_user_by_login(
        &self,
        token: &AppAccessToken,
        login: &str,
    ) -> Result<Option<HelixUser>, TwitchError> {
        let envelope: HelixResponse<HelixUser> = self
            .get_helix(token, "users", &[("login", login)], &format!("users(login={login})"))
            .await?;
        Ok(envelope.data.into_iter().next())
    }

    /// Reads the channel record for a broadcaster.
    ///
    /// # Errors
    ///
    /// - [`TwitchError::Http`] on network failure or non-2xx status.
    /// - [`TwitchError::Deserialize`] if the response shape is unexpected.
    pub async fn get_channel(
        &self,
        token: &AppAccessToken,
        broadcaster_id: &str,
    ) -> Result<Option<HelixChannel>, TwitchError> {
        let envelope: HelixResponse<HelixChannel> = self
            .get_helix(
                token,
                "channels",
                &[("broadcaster_id", broadcaster_id)],
                &format!("channels(broadcaster_id={broadcaster_id})"),
            )
            .await?;
        Ok(envelope.data.into_iter().next())
    }

    /// Reads the follower total for a broadcaster.
    ///
    /// # Errors
    ///
    /// - [`TwitchError::Http`] on network failure or non-2xx status.
    /// - [`TwitchError::Deserialize`] if the response shape is unexpected.
    pub async fn get_follower_total(
        &self,
        token: &AppAccessToken,
        broadcaster_id: &str,
    ) -> Result<u64, TwitchError> {
        let response: FollowersResponse = self
            .get_helix(
                token,
                "channels/followers",
                &[("broadcaster_id", broadcaster_id)],
                &format!("channels/followers(broadcaster_id={broadcaster_id})"),
            )
            .await?;
        Ok(response.total)
    }

    /// Reads the live stream for a user; `None` when the channel is offline.
    ///
    /// # Errors
    ///
    /// - [`TwitchError::Http`] on network failure or non-2xx status.
    /// - [`TwitchError::Deserialize`] if the response shape is unexpected.
    pub async fn get_stream(
        &self,
        token: &AppAccessToken,
        user_id: &str,
    ) -> Result<Option<HelixStream>, TwitchError> {
        let envelope: HelixResponse<HelixStream> = self
            .get_helix(
                token,
                "streams",
                &[("user_id", user_id)],
                &format!("streams(user_id={user_id})"),
            )
            .await?;
        Ok(envelope.data.into_iter().next())
    }

    /// Lists up to `first` recent videos for a user.
    ///
    /// # Errors
    ///
    /// - [`TwitchError::Http`] on network failure or non-2xx status.
    /// - [`TwitchError::Deserialize`] if the response shape is unexpected.
    pub async fn get_videos(
        &self,
        token: &AppAccessToken,
        user_id: &str,
        first: u32,
    ) -> Result<Vec<HelixVideo>, TwitchError> {
        let first = first.to_string();
        let envelope: HelixResponse<HelixVideo> = self
            .get_helix(
                token,
                "videos",
                &[("user_id", user_id), ("first", &first)],
                &format!("videos(user_id={user_id})"),
            )
            .await?;
        Ok(envelope.data)
    }

    /// Lists up to `first` recent clips for a broadcaster.
    ///
    /// # Errors
    ///
    /// - [`TwitchError::Http`] on network failure or non-2xx status.
    /// - [`TwitchError::Deserialize`] if the response shape is unexpected.
    pub async fn get_clips(
        &self,
        token: &AppAccessToken,
        broadcaster_id: &str,
        first: u32,
    ) -> Result<Vec<HelixClip>, TwitchError> {
        let first = first.to_string();
        let envelope: HelixResponse<HelixClip> = self
            .get_helix(
                token,
                "clips",
                &[("broadcaster_id", broadcaster_id), ("first", &first)],
                &format!("clips(broadcaster_id={broadcaster_id})"),
            )
            .await?;
        Ok(envelope.data)
    }

    /// Builds a Helix endpoint URL with percent-encoded query parameters.
    pub(crate) fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, TwitchError> {
        let mut url = self
            .api_base
            .join(path.trim_start_matches('/'))
            .map_err(|e| TwitchError::InvalidUrl(format!("'{path}': {e}")))?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends an authenticated GET, asserts a 2xx status, and parses the body.
    async fn get_helix<T: DeserializeOwned>(
        &self,
        token: &AppAccessToken,
        path: &str,
        params: &[(&str, &str)],
        context: &str,
    ) -> Result<T, TwitchError> {
        let url = self.build_url(path, params)?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&token.access_token)
            .header("Client-Id", &self.client_id)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| TwitchError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
