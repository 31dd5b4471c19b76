// ABOUTME: Integration tests for the game backend's /auth, /callback and /session
// ABOUTME: Uses a stub authorization server on a real listener to script upstream responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get as get_route,
    Router,
};
use common::{body_json, body_string, get, resource_server_config, session_cookie};
use game_auth::models::ResourceSession;
use game_auth::resource_server::{self, ResourceServerResources};
use game_auth::session::{InMemorySessionStore, SessionStore};
use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

const BACKEND_URL: &str = "http://game.test";

/// What the stub authorization server answers
#[derive(Clone, Copy)]
enum Upstream {
    LoginRedirect,
    GrantRedirect,
    ServerError,
}

/// Requests seen by the stub: (query, cookie header)
type Seen = Arc<Mutex<Vec<(HashMap<String, String>, Option<String>)>>>;

async fn stub_authorize(
    State((mode, seen)): State<(Upstream, Seen)>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let cookie = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let state = query.get("state").cloned().unwrap_or_default();
    let redirect_uri = query.get("redirect_uri").cloned().unwrap_or_default();
    seen.lock().unwrap().push((query, cookie));

    match mode {
        Upstream::LoginRedirect => (
            StatusCode::FOUND,
            [(header::LOCATION, format!("/login/?state={state}"))],
        )
            .into_response(),
        Upstream::GrantRedirect => (
            StatusCode::FOUND,
            [(
                header::LOCATION,
                format!("{redirect_uri}?login=lgn%3Aalice&otp=otp%3A99&state={state}"),
            )],
        )
            .into_response(),
        Upstream::ServerError => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

async fn spawn_upstream(mode: Upstream) -> (String, Seen) {
    let seen: Seen = Arc::default();
    let router = Router::new()
        .route("/oauth/authorize", get_route(stub_authorize))
        .with_state((mode, Arc::clone(&seen)));
    (common::spawn_router(router).await, seen)
}

fn app_with_store(
    auth_backend_url: &str,
    store: Arc<InMemorySessionStore<ResourceSession>>,
) -> Router {
    common::init_test_logging();
    let config = resource_server_config(auth_backend_url, BACKEND_URL);
    let resources = ResourceServerResources::with_store(&config, store).unwrap();
    resource_server::app(Arc::new(resources), &config.cors)
}

fn app(auth_backend_url: &str) -> Router {
    app_with_store(auth_backend_url, Arc::new(InMemorySessionStore::new()))
}

#[tokio::test]
async fn test_callback_then_session_returns_credential() -> Result<(), Box<dyn Error>> {
    let app = app("http://auth.invalid");

    let callback = app
        .clone()
        .oneshot(get("/callback?state=s1&login=lgn:alice&otp=otp:42", None))
        .await?;
    assert_eq!(callback.status(), StatusCode::OK);
    assert_eq!(body_string(callback).await, "");

    let session = app.oneshot(get("/session?session_id=s1", None)).await?;
    assert_eq!(session.status(), StatusCode::OK);
    assert_eq!(
        body_json(session).await,
        serde_json::json!({"login": "lgn:alice", "otp": "otp:42"})
    );
    Ok(())
}

#[tokio::test]
async fn test_callback_overwrites_previous_entry() -> Result<(), Box<dyn Error>> {
    let store = Arc::new(InMemorySessionStore::<ResourceSession>::new());
    store.put("s1", ResourceSession::pending("s1")).await?;
    let app = app_with_store("http://auth.invalid", Arc::clone(&store));

    let callback = app
        .oneshot(get("/callback?state=s1&login=lgn:alice&otp=otp:1", None))
        .await?;

    assert_eq!(callback.status(), StatusCode::OK);
    assert_eq!(
        store.get("s1").await?,
        Some(ResourceSession::completed("s1", "lgn:alice", "otp:1"))
    );
    Ok(())
}

#[tokio::test]
async fn test_unknown_session_is_404_with_empty_body() -> Result<(), Box<dyn Error>> {
    let app = app("http://auth.invalid");

    for session_id in ["x", "s1", "00000000-0000-0000-0000-000000000000"] {
        let response = app
            .clone()
            .oneshot(get(&format!("/session?session_id={session_id}"), None))
            .await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(response).await, "");
    }
    Ok(())
}

#[tokio::test]
async fn test_missing_parameters_are_500() -> Result<(), Box<dyn Error>> {
    let cases = [
        ("/session", "session_id required"),
        ("/session?session_id=", "session_id required"),
        ("/callback?state=s1&login=lgn:alice", "Invalid request"),
        ("/callback?login=lgn:alice&otp=otp:1", "Invalid request"),
        ("/callback?state=s1&otp=otp:1", "Invalid request"),
    ];

    for (uri, expected) in cases {
        let response = app("http://auth.invalid").oneshot(get(uri, None)).await?;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(body_string(response).await, expected);
    }
    Ok(())
}

#[tokio::test]
async fn test_auth_new_session_reports_login_url_and_registers_placeholder(
) -> Result<(), Box<dyn Error>> {
    let (upstream, seen) = spawn_upstream(Upstream::LoginRedirect).await;
    let app = app(&upstream);

    let response = app.clone().oneshot(get("/auth", None)).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response).unwrap();
    let body = body_json(response).await;

    let session_id = body["sessionId"].as_str().unwrap().to_owned();
    assert_eq!(session_id, cookie);
    assert_eq!(
        body["authFrontendUrl"],
        format!("{upstream}/login/?state={session_id}")
    );

    {
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let (query, forwarded_cookie) = &seen[0];
        assert_eq!(query["client_id"], "c1");
        assert_eq!(query["response_type"], "game_auth");
        assert_eq!(query["redirect_uri"], format!("{BACKEND_URL}/callback"));
        assert_eq!(query["state"], session_id);
        assert_eq!(forwarded_cookie, &None);
    }

    let pending = app
        .oneshot(get(&format!("/session?session_id={session_id}"), None))
        .await?;
    assert_eq!(pending.status(), StatusCode::OK);
    assert_eq!(
        body_json(pending).await,
        serde_json::json!({"login": "", "otp": ""})
    );
    Ok(())
}

#[tokio::test]
async fn test_auth_forwards_existing_session_cookie() -> Result<(), Box<dyn Error>> {
    let (upstream, seen) = spawn_upstream(Upstream::LoginRedirect).await;
    let store = Arc::new(InMemorySessionStore::<ResourceSession>::new());
    let app = app_with_store(&upstream, Arc::clone(&store));

    let response = app.oneshot(get("/auth", Some("returning-1"))).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(session_cookie(&response).as_deref(), Some("returning-1"));
    assert_eq!(body_json(response).await["sessionId"], "returning-1");

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].0["state"], "returning-1");
    assert_eq!(seen[0].1.as_deref(), Some("auth_session_id=returning-1"));
    assert!(store.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_auth_grant_redirect_is_stored_directly() -> Result<(), Box<dyn Error>> {
    let (upstream, _seen) = spawn_upstream(Upstream::GrantRedirect).await;
    let store = Arc::new(InMemorySessionStore::<ResourceSession>::new());
    let app = app_with_store(&upstream, Arc::clone(&store));

    let response = app.clone().oneshot(get("/auth", Some("returning-2"))).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["sessionId"], "returning-2");
    assert!(body["authFrontendUrl"]
        .as_str()
        .unwrap()
        .starts_with(&format!("{BACKEND_URL}/callback?")));

    let session = app
        .oneshot(get("/session?session_id=returning-2", None))
        .await?;
    assert_eq!(
        body_json(session).await,
        serde_json::json!({"login": "lgn:alice", "otp": "otp:99"})
    );
    assert_eq!(store.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_auth_upstream_error_is_500_without_table_writes() -> Result<(), Box<dyn Error>> {
    let (upstream, _seen) = spawn_upstream(Upstream::ServerError).await;
    let store = Arc::new(InMemorySessionStore::<ResourceSession>::new());

    let response = app_with_store(&upstream, Arc::clone(&store))
        .oneshot(get("/auth", None))
        .await?;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_string(response).await, "Failed to redirect");
    assert!(store.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_auth_unreachable_upstream_is_500() -> Result<(), Box<dyn Error>> {
    let (listener, closed_url) = common::bind_local().await;
    drop(listener);
    let store = Arc::new(InMemorySessionStore::<ResourceSession>::new());

    let response = app_with_store(&closed_url, Arc::clone(&store))
        .oneshot(get("/auth", None))
        .await?;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(store.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_health_reports_game_backend() -> Result<(), Box<dyn Error>> {
    let response = app("http://auth.invalid").oneshot(get("/health", None)).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["service"], "game-backend");
    Ok(())
}

#[tokio::test]
async fn test_repeated_parameters_use_first_value() -> Result<(), Box<dyn Error>> {
    let app = app("http://auth.invalid");

    let callback = app
        .clone()
        .oneshot(get(
            "/callback?state=s1&state=s2&login=lgn:alice&otp=otp:42&otp=otp:43",
            None,
        ))
        .await?;
    assert_eq!(callback.status(), StatusCode::OK);

    let session = app
        .clone()
        .oneshot(get("/session?session_id=s1&session_id=s2", None))
        .await?;
    assert_eq!(session.status(), StatusCode::OK);
    assert_eq!(
        body_json(session).await,
        serde_json::json!({"login": "lgn:alice", "otp": "otp:42"})
    );

    let unknown = app
        .oneshot(get("/session?session_id=s2&session_id=s1", None))
        .await?;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    Ok(())
}
