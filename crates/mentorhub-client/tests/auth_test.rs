//! Integration tests for login, logout, and idle teardown.

mod helpers;

use std::time::Duration;

use mentorhub_client::{AuthApi, IdleMonitor};
use mentorhub_core::error::ErrorKind;
use mentorhub_core::traits::SessionStore;
use mentorhub_core::types::UserType;
use mentorhub_session::keys;

use helpers::{INITIAL_TOKEN, MockApi, PASSWORD, REFRESH_TOKEN, TestClient};

#[tokio::test]
async fn test_login_stores_credentials() {
    let api = MockApi::start().await;
    let t = TestClient::new(&api, "/login");
    let auth = AuthApi::new(t.client.clone());

    let creds = auth.login("ada@mentorhub.test", PASSWORD).await.unwrap();

    assert_eq!(creds.access_token, INITIAL_TOKEN);
    assert_eq!(creds.user_type, UserType::Mentor);
    assert_eq!(t.stored(keys::ACCESS_TOKEN).await.as_deref(), Some(INITIAL_TOKEN));
    assert_eq!(t.stored(keys::REFRESH_TOKEN).await.as_deref(), Some(REFRESH_TOKEN));
    assert_eq!(t.stored(keys::USER_ID).await.as_deref(), Some("user-42"));
    assert_eq!(t.stored(keys::USER_TYPE).await.as_deref(), Some("Mentor"));

    let entries = t.store.entries().await.unwrap();
    let access = entries.iter().find(|e| e.key == keys::ACCESS_TOKEN).unwrap();
    assert!(access.expires_at.is_some());

    assert_eq!(auth.current_session().await.unwrap(), Some(creds));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let api = MockApi::start().await;
    let t = TestClient::new(&api, "/login");
    let auth = AuthApi::new(t.client.clone());

    let err = auth.login("ada@mentorhub.test", "wrong").await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(err.message.contains("Invalid email or password"));
    assert_eq!(api.refresh_calls(), 0);
    assert!(t.navigator.redirects().is_empty());
    assert!(auth.current_session().await.unwrap().is_none());
}

#[tokio::test]
async fn test_logout_clears_everything() {
    let api = MockApi::start().await;
    let t = TestClient::new(&api, "/login");
    let auth = AuthApi::new(t.client.clone());
    auth.login("ada@mentorhub.test", PASSWORD).await.unwrap();

    auth.logout().await.unwrap();

    for key in keys::ALL_KEYS {
        assert_eq!(t.stored(key).await, None);
    }
    assert!(auth.current_session().await.unwrap().is_none());
}

#[tokio::test]
async fn test_logged_in_session_survives_refresh() {
    let api = MockApi::start().await;
    let t = TestClient::new(&api, "/login");
    let auth = AuthApi::new(t.client.clone());
    auth.login("ada@mentorhub.test", PASSWORD).await.unwrap();
    t.navigator.navigate("/dashboard");

    // Expire the token on the server side.
    t.store
        .set(keys::ACCESS_TOKEN, "revoked", Some(Duration::from_secs(60)))
        .await
        .unwrap();

    let body: serde_json::Value = t.client.get_json("/communities").await.unwrap();
    assert_eq!(body["items"][0]["name"], "Rustaceans");

    let session = auth.current_session().await.unwrap().unwrap();
    assert_eq!(session.access_token, api.valid_token());
    assert_eq!(session.user_type, UserType::Mentor);
}

#[tokio::test]
async fn test_idle_timeout_ends_session() {
    let api = MockApi::start().await;
    let t = TestClient::new(&api, "/mentor/events");
    t.seed(Some(INITIAL_TOKEN), Some(REFRESH_TOKEN), "Mentor").await;

    let monitor = IdleMonitor::spawn(Duration::from_millis(300), t.client.terminator().clone());
    let client = t.client.clone().with_activity_tracker(monitor.tracker());

    client
        .send(mentorhub_client::ApiRequest::get("/communities"))
        .await
        .unwrap();

    assert!(monitor.join().await);
    assert_eq!(t.stored(keys::ACCESS_TOKEN).await, None);
    assert_eq!(t.navigator.redirects(), vec!["/".to_string()]);
}

#[tokio::test]
async fn test_idle_teardown_during_refresh_discards_new_token() {
    let api = MockApi::start().await;
    api.set_refresh_delay(Duration::from_millis(600));
    let t = TestClient::new(&api, "/mentor/events");
    t.seed(Some("stale"), Some(REFRESH_TOKEN), "Mentor").await;

    let monitor = IdleMonitor::spawn(Duration::from_millis(150), t.client.terminator().clone());
    let client = t.client.clone().with_activity_tracker(monitor.tracker());

    let err = client
        .send(mentorhub_client::ApiRequest::get("/communities"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Session);
    assert!(monitor.join().await);
    assert_eq!(api.refresh_calls(), 1);
    for key in keys::TEARDOWN_KEYS {
        assert_eq!(t.stored(key).await, None, "{key} survived teardown");
    }
    assert_eq!(t.navigator.redirects(), vec!["/".to_string()]);
    assert_eq!(api.seen_tokens(), vec![Some("stale".to_string())]);
}
