//! Integration tests for the redirect-login handshake.
//!
//! The session store is process-wide, so every test touching it runs
//! serially and starts from a cleared store.

use atmosaether::api::ApiClient;
use atmosaether::auth::{self, Handshake, HandshakeOutcome};
use atmosaether::{browser, session};
use serial_test::serial;

const ADA_EXCHANGE_BODY: &str = r#"{
    "success": true,
    "user": {
        "name": "Ada",
        "email": "ada@x.com",
        "picture": "https://img.example.com/ada.png"
    }
}"#;

#[tokio::test]
#[serial]
async fn exchange_succeeds_end_to_end() {
    session::clear();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/session")
        .match_body(mockito::Matcher::Json(
            serde_json::json!({"session_id": "abc123"}),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ADA_EXCHANGE_BODY)
        .create_async()
        .await;

    let api = ApiClient::new(server.url());
    let guard = Handshake::new();
    let outcome = auth::run_handshake(&guard, &api, "session_id=abc123", "").await;

    mock.assert_async().await;
    assert_eq!(outcome, Some(HandshakeOutcome::ToChat));

    let user = session::current().expect("session should be established");
    assert_eq!(user.name, "Ada");
    assert_eq!(user.email, "ada@x.com");
}

#[tokio::test]
#[serial]
async fn duplicate_invocation_exchanges_once() {
    session::clear();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/session")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ADA_EXCHANGE_BODY)
        .expect(1)
        .create_async()
        .await;

    let api = ApiClient::new(server.url());
    let guard = Handshake::new();
    let (first, second) = tokio::join!(
        auth::run_handshake(&guard, &api, "session_id=abc123", ""),
        auth::run_handshake(&guard, &api, "session_id=abc123", ""),
    );

    mock.assert_async().await;
    // Exactly one invocation owns the terminal navigation.
    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|o| o.is_some()).count(), 1);
    assert!(outcomes.contains(&Some(HandshakeOutcome::ToChat)));
}

#[tokio::test]
#[serial]
async fn code_in_query_string_still_succeeds() {
    session::clear();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/session")
        .match_body(mockito::Matcher::Json(
            serde_json::json!({"session_id": "from-query"}),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ADA_EXCHANGE_BODY)
        .create_async()
        .await;

    let api = ApiClient::new(server.url());
    let guard = Handshake::new();
    let outcome = auth::run_handshake(&guard, &api, "", "foo=1&session_id=from-query").await;

    mock.assert_async().await;
    assert_eq!(outcome, Some(HandshakeOutcome::ToChat));
}

#[tokio::test]
#[serial]
async fn missing_code_fails_without_network_call() {
    session::clear();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/session")
        .expect(0)
        .create_async()
        .await;

    let api = ApiClient::new(server.url());
    let guard = Handshake::new();
    let outcome = auth::run_handshake(&guard, &api, "", "").await;

    mock.assert_async().await;
    assert_eq!(outcome, Some(HandshakeOutcome::ToLogin));
    assert!(!session::is_authenticated());
}

#[tokio::test]
#[serial]
async fn rejected_exchange_clears_any_session() {
    session::establish(atmosaether::types::UserProfile {
        name: "Stale".into(),
        email: "stale@x.com".into(),
        picture: None,
    });

    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/auth/session")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": false}"#)
        .create_async()
        .await;

    let api = ApiClient::new(server.url());
    let guard = Handshake::new();
    let outcome = auth::run_handshake(&guard, &api, "session_id=bad", "").await;

    assert_eq!(outcome, Some(HandshakeOutcome::ToLogin));
    assert!(!session::is_authenticated());
}

#[tokio::test]
#[serial]
async fn network_error_is_a_login_outcome() {
    session::clear();
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/auth/session")
        .with_status(500)
        .with_body("backend down")
        .create_async()
        .await;

    let api = ApiClient::new(server.url());
    let guard = Handshake::new();
    let outcome = auth::run_handshake(&guard, &api, "session_id=abc123", "").await;

    assert_eq!(outcome, Some(HandshakeOutcome::ToLogin));
    assert!(!session::is_authenticated());
}

#[tokio::test]
#[serial]
async fn logout_always_exits_even_when_backend_fails() {
    session::establish(atmosaether::types::UserProfile {
        name: "Ada".into(),
        email: "ada@x.com".into(),
        picture: None,
    });

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/logout")
        .with_status(500)
        .with_body("logout exploded")
        .create_async()
        .await;

    let api = ApiClient::new(server.url());
    auth::sign_out(&api).await;

    mock.assert_async().await;
    assert!(!session::is_authenticated());
}

#[test]
#[serial]
fn login_redirect_carries_live_origin_callback() {
    browser::set_location("https://app.example.com", "", "");
    std::env::set_var("AUTH_ORIGIN", "https://auth.example.test");

    let url = auth::login_redirect_url();
    assert_eq!(
        url,
        "https://auth.example.test/?redirect=https%3A%2F%2Fapp.example.com%2Fauth%2Fcallback"
    );

    std::env::remove_var("AUTH_ORIGIN");
}
