// ABOUTME: Authorization decision for GET /oauth/authorize
// ABOUTME: Validates the client, then redirects to the login frontend or back to the caller with login/OTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Authorization state machine
//!
//! ```text
//! unknown client          -> rejected (unauthorized_client)
//! no session cookie       -> redirect to login frontend
//! session not in table    -> redirect to login frontend
//! session authenticated   -> redirect to redirect_uri with login, otp, state
//! ```
//!
//! Validation produces an `AuthorizeRequest` borrowing the raw parameters;
//! only a validated request can be decided, so the session table is never
//! consulted for a malformed or unauthorized call.

use super::directory::ClientRegistry;
use crate::errors::{AppError, AppResult};
use crate::routes::QueryParams;
use game_auth_core::constants::protocol::RESPONSE_TYPE_GAME_AUTH;
use game_auth_core::models::LoginCredential;
use url::Url;

/// Raw `/oauth/authorize` query parameters; absent values are empty
#[derive(Debug, Clone, Default)]
pub struct AuthorizeParams {
    /// Requesting client
    pub client_id: String,
    /// Where the grant redirect is sent
    pub redirect_uri: String,
    /// Requested response variant (`game_auth`)
    pub response_type: String,
    /// Caller-owned correlation value, passed through untouched
    pub state: String,
}

impl AuthorizeParams {
    /// Parameters from the raw query string; the first occurrence of a key wins
    #[must_use]
    pub fn from_query(raw_query: Option<&str>) -> Self {
        let mut values = QueryParams::from_raw(raw_query);
        Self {
            client_id: values.take("client_id"),
            redirect_uri: values.take("redirect_uri"),
            response_type: values.take("response_type"),
            state: values.take("state"),
        }
    }

    /// Check required parameters and client registration
    ///
    /// # Errors
    ///
    /// `invalid_request` if `client_id` or `redirect_uri` is missing,
    /// `unauthorized_client` if the client is not registered
    pub fn validate<'a>(&'a self, clients: &ClientRegistry) -> AppResult<AuthorizeRequest<'a>> {
        if self.client_id.is_empty() || self.redirect_uri.is_empty() {
            return Err(AppError::invalid_request("invalid_request"));
        }

        if !clients.contains(&self.client_id) {
            return Err(AppError::unauthorized_client());
        }

        Ok(AuthorizeRequest { params: self })
    }
}

/// An authorization request from a registered client
#[derive(Debug, Clone, Copy)]
pub struct AuthorizeRequest<'a> {
    params: &'a AuthorizeParams,
}

/// Outcome of an authorization request; both variants are 302 redirects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizeDecision {
    /// Browser session is not authenticated; go to the login frontend
    NeedsLogin {
        /// Login frontend URL carrying the incoming query string
        location: String,
    },
    /// Browser session is authenticated; return the credential to the caller
    Grant {
        /// `redirect_uri` with `login`, `otp`, and `state` appended
        location: String,
    },
}

impl AuthorizeDecision {
    /// Redirect target
    #[must_use]
    pub fn location(&self) -> &str {
        match self {
            Self::NeedsLogin { location } | Self::Grant { location } => location,
        }
    }
}

impl AuthorizeRequest<'_> {
    /// Requesting client
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.params.client_id
    }

    /// Decide where to send the browser
    ///
    /// `credential` is the stored login/OTP for the browser's session, if any.
    /// `raw_query` is forwarded to the login frontend byte-for-byte so it can
    /// replay the same client/redirect context to `/oauth/token`; no pending
    /// request state is kept server-side.
    ///
    /// # Errors
    ///
    /// `unsupported_response_type` for an authenticated session asking for
    /// anything but `game_auth`, `invalid_request` if `redirect_uri` is not an
    /// absolute URL
    pub fn decide(
        &self,
        credential: Option<&LoginCredential>,
        raw_query: &str,
        login_frontend_url: &str,
    ) -> AppResult<AuthorizeDecision> {
        let Some(credential) = credential else {
            return Ok(AuthorizeDecision::NeedsLogin {
                location: format!(
                    "{}/?{raw_query}",
                    login_frontend_url.trim_end_matches('/')
                ),
            });
        };

        match self.params.response_type.as_str() {
            RESPONSE_TYPE_GAME_AUTH => Ok(AuthorizeDecision::Grant {
                location: grant_redirect(&self.params.redirect_uri, credential, &self.params.state)?,
            }),
            _ => Err(AppError::unsupported_response_type()),
        }
    }
}

fn grant_redirect(
    redirect_uri: &str,
    credential: &LoginCredential,
    state: &str,
) -> AppResult<String> {
    let mut url = Url::parse(redirect_uri)
        .map_err(|e| AppError::invalid_request("invalid redirect_uri").with_source(e))?;

    url.query_pairs_mut()
        .append_pair("login", &credential.login)
        .append_pair("otp", &credential.otp)
        .append_pair("state", state);

    Ok(url.into())
}
