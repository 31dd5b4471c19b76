// ABOUTME: Game backend route handlers for /auth, /callback and /session
// ABOUTME: Starts the delegated flow, receives the grant redirect, and serves the resulting login/OTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AuthorizeRedirect, ResourceServerResources};
use crate::errors::AppError;
use crate::logging::AppLogger;
use crate::routes::QueryParams;
use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use axum_extra::extract::CookieJar;
use game_auth_core::constants::routes;
use game_auth_core::models::ResourceSession;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// `/auth` response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Where the caller's browser should navigate
    pub auth_frontend_url: String,
    /// Correlation ID to poll `/session` with
    pub session_id: String,
}

/// `/callback` query parameters
#[derive(Debug, Clone, Default)]
pub struct CallbackParams {
    /// Session ID echoed back by the authorization server
    pub state: String,
    /// Issued login
    pub login: String,
    /// Issued one-time token
    pub otp: String,
}

impl CallbackParams {
    /// Parameters from the raw query string; the first occurrence of a key wins
    #[must_use]
    pub fn from_query(raw_query: Option<&str>) -> Self {
        let mut values = QueryParams::from_raw(raw_query);
        Self {
            state: values.take("state"),
            login: values.take("login"),
            otp: values.take("otp"),
        }
    }
}

/// `/session` query parameters
#[derive(Debug, Clone, Default)]
pub struct SessionQuery {
    /// Session ID returned by `/auth`
    pub session_id: String,
}

impl SessionQuery {
    /// Parameters from the raw query string; the first occurrence of a key wins
    #[must_use]
    pub fn from_query(raw_query: Option<&str>) -> Self {
        Self {
            session_id: QueryParams::from_raw(raw_query).take("session_id"),
        }
    }
}

/// Game backend routes
pub struct ResourceServerRoutes;

impl ResourceServerRoutes {
    /// Create the `/auth`, `/callback` and `/session` routes
    pub fn routes(resources: Arc<ResourceServerResources>) -> Router {
        Router::new()
            .route(routes::AUTH, get(Self::handle_auth))
            .route(routes::CALLBACK, get(Self::handle_callback))
            .route(routes::SESSION, get(Self::handle_session))
            .with_state(resources)
    }

    /// Start a delegated authorization flow
    ///
    /// Tables are only written once the authorization server has answered
    /// with a usable redirect.
    async fn handle_auth(
        State(resources): State<Arc<ResourceServerResources>>,
        jar: CookieJar,
    ) -> Result<Response, AppError> {
        let (jar, session_id, created) = resources.session_cookie.get_or_create(jar);
        debug!(session.id = %session_id, created, "check session");

        let response = resources
            .authorization_client
            .authorize(&session_id, !created)
            .await?;

        if created {
            resources
                .sessions
                .put(&session_id, ResourceSession::pending(session_id.clone()))
                .await?;
        }

        // A returning authenticated browser is granted straight away
        if let AuthorizeRedirect::Grant { login, otp, state } = &response.redirect {
            resources
                .sessions
                .put(state, ResourceSession::completed(state.clone(), login.clone(), otp.clone()))
                .await?;
            AppLogger::log_handoff_event(state, "auth_granted", Some("grant redirect stored"));
        } else {
            AppLogger::log_handoff_event(&session_id, "auth_started", Some("login required"));
        }

        let body = AuthResponse {
            auth_frontend_url: response.location,
            session_id,
        };
        Ok((jar, Json(body)).into_response())
    }

    /// Receive the grant redirect
    async fn handle_callback(
        State(resources): State<Arc<ResourceServerResources>>,
        RawQuery(raw_query): RawQuery,
    ) -> Result<Response, AppError> {
        let params = CallbackParams::from_query(raw_query.as_deref());
        if params.state.is_empty() || params.login.is_empty() || params.otp.is_empty() {
            return Err(AppError::invalid_request("Invalid request"));
        }

        resources
            .sessions
            .put(
                &params.state,
                ResourceSession::completed(params.state.clone(), params.login, params.otp),
            )
            .await?;
        AppLogger::log_handoff_event(&params.state, "callback", None);

        Ok(StatusCode::OK.into_response())
    }

    /// Look up the login/OTP for a session
    async fn handle_session(
        State(resources): State<Arc<ResourceServerResources>>,
        RawQuery(raw_query): RawQuery,
    ) -> Result<Response, AppError> {
        let query = SessionQuery::from_query(raw_query.as_deref());
        if query.session_id.is_empty() {
            return Err(AppError::invalid_request("session_id required"));
        }

        let session = resources
            .sessions
            .get(&query.session_id)
            .await?
            .ok_or_else(|| AppError::session_not_found(query.session_id.as_str()))?;

        info!(
            session.id = %session.id,
            complete = session.is_complete(),
            "session lookup"
        );
        Ok(Json(session.credential()).into_response())
    }
}
