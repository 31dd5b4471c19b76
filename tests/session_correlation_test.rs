// ABOUTME: Tests for the session-ID correlation cookie and pluggable session stores
// ABOUTME: Checks idempotent get-or-create and that handlers work against any SessionStore
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use common::{auth_server_config, body_string, get, post_form};
use game_auth::auth_server::{self, AuthServerResources};
use game_auth::constants::cookies::SESSION_COOKIE_NAME;
use game_auth::errors::{AppError, AppResult};
use game_auth::models::LoginCredential;
use game_auth::session::{read_session_id, SessionCookie, SessionStore};
use std::collections::HashSet;
use std::error::Error;
use std::sync::Arc;
use tower::ServiceExt;

#[test]
fn test_same_cookie_yields_same_id() {
    let issuer = SessionCookie::default();
    let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE_NAME, "s-fixed"));

    let (jar, first, first_created) = issuer.get_or_create(jar);
    let (_, second, second_created) = issuer.get_or_create(jar);

    assert_eq!(first, "s-fixed");
    assert_eq!(second, "s-fixed");
    assert!(!first_created);
    assert!(!second_created);
}

#[test]
fn test_fresh_browsers_get_distinct_ids() {
    let issuer = SessionCookie::default();
    let ids: HashSet<String> = (0..100)
        .map(|_| {
            let (jar, id, created) = issuer.get_or_create(CookieJar::new());
            assert!(created);
            assert_eq!(read_session_id(&jar).as_deref(), Some(id.as_str()));
            id
        })
        .collect();
    assert_eq!(ids.len(), 100);
}

/// Store whose backend is always down
struct UnavailableStore;

#[async_trait]
impl SessionStore<LoginCredential> for UnavailableStore {
    async fn get(&self, _id: &str) -> AppResult<Option<LoginCredential>> {
        Err(AppError::storage("session backend unavailable"))
    }

    async fn put(&self, _id: &str, _value: LoginCredential) -> AppResult<()> {
        Err(AppError::storage("session backend unavailable"))
    }
}

#[tokio::test]
async fn test_store_failures_surface_as_500() -> Result<(), Box<dyn Error>> {
    common::init_test_logging();
    let config = auth_server_config();
    let resources = AuthServerResources::with_store(&config, Arc::new(UnavailableStore));
    let app = auth_server::app(Arc::new(resources), &config.cors);

    let token = app
        .clone()
        .oneshot(post_form(
            "/oauth/token",
            "grant_type=login_otp&username=alice&password=secret&client_id=c1",
            None,
        ))
        .await?;
    assert_eq!(token.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_string(token).await, "session backend unavailable");

    // Without a cookie the store is never consulted
    let authorize = app
        .clone()
        .oneshot(get(
            "/oauth/authorize?client_id=c1&redirect_uri=http://x/cb&response_type=game_auth",
            None,
        ))
        .await?;
    assert_eq!(authorize.status(), StatusCode::FOUND);

    let authorize = app
        .oneshot(get(
            "/oauth/authorize?client_id=c1&redirect_uri=http://x/cb&response_type=game_auth",
            Some("s1"),
        ))
        .await?;
    assert_eq!(authorize.status(), StatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}
