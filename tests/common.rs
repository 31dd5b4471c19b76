// ABOUTME: Shared test utilities for the authorization server and game backend integration tests
// ABOUTME: Provides logging setup, config builders, response helpers, and real listener spawning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `game_auth`

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response},
    Router,
};
use game_auth::config::{AuthServerConfig, CookieConfig, CorsConfig, ResourceServerConfig};
use game_auth::constants::cookies::SESSION_COOKIE_NAME;
use std::sync::Once;
use std::time::Duration;
use tokio::net::TcpListener;

static INIT_LOGGER: Once = Once::new();

pub const CLIENT_ID: &str = "c1";
pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "secret";
pub const LOGIN_FRONTEND: &str = "http://login.test";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Authorization server config for client `c1` and user `alice`
pub fn auth_server_config() -> AuthServerConfig {
    AuthServerConfig {
        http_port: 0,
        client_id: CLIENT_ID.to_owned(),
        username: USERNAME.to_owned(),
        password: PASSWORD.to_owned(),
        auth_frontend_url: LOGIN_FRONTEND.to_owned(),
        cookie: CookieConfig::default(),
        cors: CorsConfig::default(),
    }
}

/// Game backend config pointing at the given base URLs
pub fn resource_server_config(auth_backend_url: &str, backend_url: &str) -> ResourceServerConfig {
    ResourceServerConfig {
        http_port: 0,
        client_id: CLIENT_ID.to_owned(),
        auth_backend_url: auth_backend_url.to_owned(),
        backend_url: backend_url.to_owned(),
        upstream_timeout: Duration::from_secs(5),
        cookie: CookieConfig::default(),
        cors: CorsConfig::default(),
    }
}

/// Bind an ephemeral local port
pub async fn bind_local() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    (listener, base_url)
}

/// Serve `router` on an ephemeral port and return its base URL
pub async fn spawn_router(router: Router) -> String {
    let (listener, base_url) = bind_local().await;
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    base_url
}

/// GET request, optionally carrying the session cookie
pub fn get(uri: &str, session_id: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(id) = session_id {
        builder = builder.header(header::COOKIE, format!("{SESSION_COOKIE_NAME}={id}"));
    }
    builder.body(Body::empty()).unwrap()
}

/// Form POST request, optionally carrying the session cookie
pub fn post_form(uri: &str, form: &str, session_id: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(id) = session_id {
        builder = builder.header(header::COOKIE, format!("{SESSION_COOKIE_NAME}={id}"));
    }
    builder.body(Body::from(form.to_owned())).unwrap()
}

/// Session ID from the response's `Set-Cookie` header
pub fn session_cookie<B>(response: &Response<B>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|value| {
            let pair = value.split(';').next()?.trim();
            let (name, id) = pair.split_once('=')?;
            (name == SESSION_COOKIE_NAME).then(|| id.to_owned())
        })
}

/// `Location` header value
pub fn location<B>(response: &Response<B>) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Collect the response body as a string
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Collect the response body as JSON
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
