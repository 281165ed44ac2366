//! Integration tests for `TwitchClient` using wiremock HTTP mocks.

use positivity_twitch::{TwitchClient, TwitchError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER_ID: &str = "141981764";

fn test_client(server: &MockServer) -> TwitchClient {
    TwitchClient::with_base_urls(
        "test-client",
        "test-secret",
        30,
        &format!("{}/helix", server.uri()),
        &format!("{}/oauth2/token", server.uri()),
    )
    .expect("client construction should not fail")
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(query_param("client_id", "test-client"))
        .and(query_param("client_secret", "test-secret"))
        .and(query_param("grant_type", "client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "app-token",
            "expires_in": 5_011_271,
            "token_type": "bearer"
        })))
        .mount(server)
        .await;
}

async fn mount_helix(server: &MockServer, endpoint: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/helix/{endpoint}")))
        .and(header("Authorization", "Bearer app-token"))
        .and(header("Client-Id", "test-client"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_user(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/helix/users"))
        .and(query_param("login", "twitchdev"))
        .and(header("Authorization", "Bearer app-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{
                "id": USER_ID,
                "login": "twitchdev",
                "display_name": "TwitchDev",
                "type": "",
                "broadcaster_type": "partner",
                "description": "Supporting third-party developers building Twitch integrations.",
                "profile_image_url": "https://static-cdn.jtvnw.net/twitchdev.png",
                "offline_image_url": "",
                "created_at": "2016-12-14T20:32:28Z"
            }]
        })))
        .mount(server)
        .await;
}

async fn mount_channel_reads(server: &MockServer, streams: serde_json::Value) {
    mount_helix(
        server,
        "channels",
        serde_json::json!({
            "data": [{
                "broadcaster_id": USER_ID,
                "broadcaster_login": "twitchdev",
                "broadcaster_name": "TwitchDev",
                "game_name": "Science & Technology",
                "title": "TwitchDev Monthly Update",
                "delay": 0
            }]
        }),
    )
    .await;
    mount_helix(
        server,
        "channels/followers",
        serde_json::json!({ "total": 8, "data": [], "pagination": {} }),
    )
    .await;
    mount_helix(server, "streams", streams).await;
    mount_helix(
        server,
        "videos",
        serde_json::json!({
            "data": [
                {
                    "id": "335921245",
                    "user_id": USER_ID,
                    "title": "Twitch Developers 101",
                    "created_at": "2026-09-20T17:04:47Z",
                    "view_count": 1863,
                    "duration": "3m21s"
                },
                {
                    "id": "335921246",
                    "user_id": USER_ID,
                    "title": "Extensions deep dive",
                    "created_at": "2026-08-01T17:04:47Z",
                    "view_count": 420
                }
            ],
            "pagination": {}
        }),
    )
    .await;
    mount_helix(
        server,
        "clips",
        serde_json::json!({
            "data": [
                { "id": "AwkwardHelplessSalamanderSwiftRage", "view_count": 10 },
                { "id": "RandomClip", "view_count": 5 }
            ],
            "pagination": {}
        }),
    )
    .await;
}

#[tokio::test]
async fn get_app_access_token_returns_token() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    let token = test_client(&server)
        .get_app_access_token()
        .await
        .expect("token should parse");
    assert_eq!(token.access_token, "app-token");
    assert_eq!(token.expires_in, 5_011_271);
}

#[tokio::test]
async fn empty_access_token_is_an_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "access_token": "" })),
        )
        .mount(&server)
        .await;

    let err = test_client(&server).get_app_access_token().await.unwrap_err();
    assert!(matches!(err, TwitchError::Auth(_)), "got {err:?}");
}

#[tokio::test]
async fn token_endpoint_rejection_is_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = test_client(&server).get_app_access_token().await.unwrap_err();
    assert!(matches!(err, TwitchError::Http(_)), "got {err:?}");
}

#[tokio::test]
async fn fetch_channel_bundle_collects_all_reads() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_user(&server).await;
    mount_channel_reads(
        &server,
        serde_json::json!({
            "data": [{
                "id": "40952121085",
                "user_id": USER_ID,
                "game_name": "Science & Technology",
                "type": "live",
                "viewer_count": 78365
            }]
        }),
    )
    .await;

    let bundle = test_client(&server)
        .fetch_channel_bundle("TwitchDev")
        .await
        .expect("bundle should be fetched");

    assert_eq!(bundle.channel.user_id, USER_ID);
    assert_eq!(bundle.channel.display_name, "TwitchDev");
    assert_eq!(
        bundle.channel.title.as_deref(),
        Some("TwitchDev Monthly Update")
    );
    assert_eq!(bundle.followers, 8);
    let stream = bundle.stream.expect("channel is live");
    assert_eq!(stream.viewer_count, 78_365);
    assert_eq!(stream.game_name, "Science & Technology");
    assert_eq!(bundle.videos.len(), 2);
    assert_eq!(bundle.videos[0].view_count, 1863);
    assert!(bundle.videos[0].game_name.is_none());
    assert_eq!(bundle.clips.len(), 2);
    assert_eq!(bundle.clips[0].view_count + bundle.clips[1].view_count, 15);
}

#[tokio::test]
async fn offline_channel_has_no_stream() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_user(&server).await;
    mount_channel_reads(&server, serde_json::json!({ "data": [], "pagination": {} })).await;

    let bundle = test_client(&server)
        .fetch_channel_bundle("twitchdev")
        .await
        .expect("bundle should be fetched");
    assert!(bundle.stream.is_none());
}

#[tokio::test]
async fn video_and_clip_limits_are_sent_as_first() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_user(&server).await;
    mount_helix(&server, "channels", serde_json::json!({ "data": [] })).await;
    mount_helix(&server, "channels/followers", serde_json::json!({ "total": 0 })).await;
    mount_helix(&server, "streams", serde_json::json!({ "data": [] })).await;
    Mock::given(method("GET"))
        .and(path("/helix/videos"))
        .and(query_param("user_id", USER_ID))
        .and(query_param("first", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/helix/clips"))
        .and(query_param("broadcaster_id", USER_ID))
        .and(query_param("first", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let bundle = test_client(&server)
        .with_limits(3, 4)
        .fetch_channel_bundle("twitchdev")
        .await
        .expect("bundle should be fetched");
    assert!(bundle.videos.is_empty());
    assert!(bundle.clips.is_empty());
    assert!(bundle.channel.title.is_none());
}

#[tokio::test]
async fn unknown_login_is_channel_not_found() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_helix(&server, "users", serde_json::json!({ "data": [] })).await;

    let err = test_client(&server)
        .fetch_channel_bundle("nobody_here")
        .await
        .unwrap_err();
    assert!(
        matches!(err, TwitchError::ChannelNotFound(ref login) if login == "nobody_here"),
        "got {err:?}"
    );
}

#[tokio::test]
async fn failing_sub_read_fails_the_bundle() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_user(&server).await;
    mount_helix(&server, "channels", serde_json::json!({ "data": [] })).await;
    mount_helix(&server, "streams", serde_json::json!({ "data": [] })).await;
    mount_helix(&server, "videos", serde_json::json!({ "data": [] })).await;
    mount_helix(&server, "clips", serde_json::json!({ "data": [] })).await;
    Mock::given(method("GET"))
        .and(path("/helix/channels/followers"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_channel_bundle("twitchdev")
        .await
        .unwrap_err();
    assert!(matches!(err, TwitchError::Http(_)), "got {err:?}");
}

#[tokio::test]
async fn malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path("/helix/users"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_channel_bundle("twitchdev")
        .await
        .unwrap_err();
    assert!(
        matches!(err, TwitchError::Deserialize { ref context, .. } if context.starts_with("users")),
        "got {err:?}"
    );
}
