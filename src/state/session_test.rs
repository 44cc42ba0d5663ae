use std::sync::{Arc, Mutex};

use axum::http::StatusCode;

use super::*;
use crate::config::ClientConfig;
use crate::test_support::{ALICE_JSON, spawn_user_endpoint, unreachable_base_url};

fn alice() -> User {
    User { id: "u1".to_owned(), name: "Alice".to_owned(), email: "a@x.com".to_owned() }
}

fn session_for(base_url: &str) -> SessionStore {
    SessionStore::new(ApiClient::new(&ClientConfig::new(base_url)).unwrap())
}

// =============================================================
// Initial state
// =============================================================

#[test]
fn new_session_has_no_user() {
    let session = session_for("http://127.0.0.1:9/api/v1");
    assert!(session.current_user().is_none());
    assert!(!session.is_authenticated());
}

// =============================================================
// check_auth
// =============================================================

#[tokio::test]
async fn check_auth_success_sets_user() {
    let mock = spawn_user_endpoint(StatusCode::OK, ALICE_JSON).await;
    let session = session_for(&mock.base_url);

    session.check_auth().await;

    assert_eq!(session.current_user(), Some(alice()));
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn check_auth_unauthorized_leaves_user_absent() {
    let mock = spawn_user_endpoint(StatusCode::UNAUTHORIZED, r#"{"error":"unauthorized"}"#).await;
    let session = session_for(&mock.base_url);

    session.check_auth().await;

    assert!(session.current_user().is_none());
    assert_eq!(mock.hits(), 1);
}

#[tokio::test]
async fn check_auth_server_error_leaves_user_absent() {
    let mock = spawn_user_endpoint(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;
    let session = session_for(&mock.base_url);

    session.check_auth().await;

    assert!(session.current_user().is_none());
}

#[tokio::test]
async fn check_auth_malformed_body_leaves_user_absent() {
    let mock = spawn_user_endpoint(StatusCode::OK, "not json").await;
    let session = session_for(&mock.base_url);

    session.check_auth().await;

    assert!(session.current_user().is_none());
}

#[tokio::test]
async fn check_auth_unreachable_server_leaves_user_absent() {
    let session = session_for(&unreachable_base_url().await);

    session.check_auth().await;

    assert!(session.current_user().is_none());
}

#[tokio::test]
async fn failed_check_keeps_existing_user() {
    let ok = spawn_user_endpoint(StatusCode::OK, ALICE_JSON).await;
    let session = session_for(&ok.base_url);
    session.check_auth().await;

    let denied = spawn_user_endpoint(StatusCode::UNAUTHORIZED, "").await;
    let later = SessionStore { user: session.user.clone(), api: session_for(&denied.base_url).api };
    later.check_auth().await;

    assert_eq!(session.current_user(), Some(alice()));
}

#[tokio::test]
async fn concurrent_checks_both_complete() {
    let mock = spawn_user_endpoint(StatusCode::OK, ALICE_JSON).await;
    let session = session_for(&mock.base_url);

    tokio::join!(session.check_auth(), session.check_auth());

    assert_eq!(session.current_user(), Some(alice()));
    assert_eq!(mock.hits(), 2);
}

#[tokio::test]
async fn state_before_awaiting_is_pre_call_state() {
    let mock = spawn_user_endpoint(StatusCode::OK, ALICE_JSON).await;
    let session = session_for(&mock.base_url);

    let pending = session.check_auth();
    assert!(session.current_user().is_none());
    pending.await;
    assert!(session.is_authenticated());
}

// =============================================================
// Bootstrap
// =============================================================

#[tokio::test]
async fn bootstrap_checks_exactly_once() {
    let mock = spawn_user_endpoint(StatusCode::OK, ALICE_JSON).await;
    let api = ApiClient::new(&ClientConfig::new(&mock.base_url)).unwrap();

    let (session, handle) = SessionStore::bootstrap(api);
    handle.await.unwrap();

    assert_eq!(session.current_user(), Some(alice()));
    assert_eq!(mock.hits(), 1);
}

// =============================================================
// Observers and logout
// =============================================================

#[tokio::test]
async fn observers_see_login_then_logout() {
    let mock = spawn_user_endpoint(StatusCode::OK, ALICE_JSON).await;
    let session = session_for(&mock.base_url);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let _sub = session.subscribe(move |user| sink.lock().unwrap().push(user.as_ref().map(|u| u.name.clone())));

    session.check_auth().await;
    session.clear();

    assert_eq!(*seen.lock().unwrap(), vec![None, Some("Alice".to_owned()), None]);
    assert!(session.current_user().is_none());
}

#[test]
fn clear_without_user_notifies_nobody() {
    let session = session_for("http://127.0.0.1:9/api/v1");
    let calls = Arc::new(Mutex::new(0));
    let sink = calls.clone();
    let _sub = session.subscribe(move |_| *sink.lock().unwrap() += 1);

    session.clear();

    assert_eq!(*calls.lock().unwrap(), 1);
}
