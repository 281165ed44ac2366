//! Channel fixture and request helpers for router tests.

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use positivity_core::{ChannelBundle, ChannelInfo};
use serde_json::Value;
use tower::ServiceExt;

pub(crate) use positivity_reporter::testing::{FakeSource, FakeStore};

pub(crate) fn sample_bundle() -> ChannelBundle {
    ChannelBundle {
        channel: ChannelInfo {
            user_id: "141981764".to_string(),
            login: "twitchdev".to_string(),
            display_name: "TwitchDev".to_string(),
            profile_image_url: "https://static-cdn.example/twitchdev.png".to_string(),
            description: None,
            title: None,
            game_name: None,
        },
        followers: 50,
        stream: None,
        videos: Vec::new(),
        clips: Vec::new(),
    }
}

async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json = serde_json::from_slice(&body).expect("json parse");
    (status, json)
}

pub(crate) async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri).await
}

pub(crate) async fn post(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::POST, uri).await
}
