// ABOUTME: Authorization server HTTP route handlers for /oauth/authorize and /oauth/token
// ABOUTME: Thin axum handlers over the authorize state machine and the login_otp grant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{
    authorize::AuthorizeParams, grant, AuthServerResources, AuthorizeDecision, TokenParams,
};
use crate::errors::AppError;
use crate::session::read_session_id;
use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use axum_extra::extract::CookieJar;
use game_auth_core::constants::routes;
use std::sync::Arc;
use tracing::{debug, info};

/// Authorization server routes
pub struct AuthServerRoutes;

impl AuthServerRoutes {
    /// Create the `/oauth/*` routes
    pub fn routes(resources: Arc<AuthServerResources>) -> Router {
        Router::new()
            .route(routes::AUTHORIZE, get(Self::handle_authorize))
            .route(
                routes::TOKEN,
                get(Self::handle_token).post(Self::handle_token),
            )
            .with_state(resources)
    }

    /// Handle authorization request (GET /oauth/authorize)
    async fn handle_authorize(
        State(resources): State<Arc<AuthServerResources>>,
        RawQuery(raw_query): RawQuery,
        jar: CookieJar,
    ) -> Result<Response, AppError> {
        let params = AuthorizeParams::from_query(raw_query.as_deref());
        let request = params.validate(&resources.clients)?;

        let credential = match read_session_id(&jar) {
            Some(session_id) => resources.sessions.get(&session_id).await?,
            None => None,
        };
        debug!(
            client_id = request.client_id(),
            authenticated = credential.is_some(),
            "check authenticated"
        );

        let decision = request.decide(
            credential.as_ref(),
            raw_query.as_deref().unwrap_or_default(),
            &resources.login_frontend_url,
        )?;

        match &decision {
            AuthorizeDecision::NeedsLogin { .. } => {
                info!(client_id = request.client_id(), "redirecting to login frontend");
            }
            AuthorizeDecision::Grant { .. } => {
                info!(client_id = request.client_id(), "redirecting with login/OTP grant");
            }
        }

        Ok(found(decision.location()))
    }

    /// Handle token request (GET or POST /oauth/token)
    ///
    /// Parameters come from the query string and, for form posts, the body.
    async fn handle_token(
        State(resources): State<Arc<AuthServerResources>>,
        RawQuery(raw_query): RawQuery,
        jar: CookieJar,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<Response, AppError> {
        let form_body = is_form(&headers).then_some(body.as_ref());
        let params = TokenParams::from_sources(raw_query.as_deref().map(str::as_bytes), form_body);
        debug!(
            grant_type = %params.grant_type,
            client_id = %params.client_id,
            "OAuth token request received"
        );

        let credential = grant::grant(&params, &resources.clients, &resources.users)?;

        let (jar, session_id, created) = resources.session_cookie.get_or_create(jar);
        // Must land before the response so the next /authorize sees the session
        resources
            .sessions
            .put(&session_id, credential.clone())
            .await?;
        info!(
            client_id = %params.client_id,
            new_session = created,
            "login/OTP issued and browser session authenticated"
        );

        Ok((jar, Json(credential)).into_response())
    }
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}

/// 302 Found with the given `Location`
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_owned())]).into_response()
}
