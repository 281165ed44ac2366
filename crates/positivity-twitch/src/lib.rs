//! Twitch Helix client for the positivity report.
//!
//! Acquires an app access token through the client-credentials grant and
//! reads the public channel data a report needs. [`TwitchClient::fetch_channel_bundle`]
//! is the single entry point the reporter uses.

pub mod bundle;
pub mod client;
pub mod error;
pub mod types;

pub use client::TwitchClient;
pub use error::TwitchError;
pub use types::AppAccessToken;
