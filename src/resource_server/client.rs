// ABOUTME: Outbound client from the game backend to the authorization server's /oauth/authorize
// ABOUTME: Never follows redirects; the 302 Location is classified as a login page or a grant redirect
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::ResourceServerConfig;
use crate::errors::{AppError, AppResult};
use game_auth_core::constants::{cookies::SESSION_COOKIE_NAME, protocol, routes};
use reqwest::{header, redirect::Policy, Client, StatusCode};
use tracing::debug;
use url::Url;

/// Where `/oauth/authorize` sent the browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizeRedirect {
    /// Login frontend; the caller must authenticate first
    Login(String),
    /// Grant redirect back to our callback carrying the credential
    Grant {
        /// Issued login
        login: String,
        /// Issued one-time token
        otp: String,
        /// Correlation session ID
        state: String,
    },
}

impl AuthorizeRedirect {
    /// Classify a resolved `Location` against our callback URL
    ///
    /// Only a URL on the callback endpoint carrying non-empty `login`, `otp`
    /// and `state` is a grant; everything else is treated as a login page.
    #[must_use]
    pub fn classify(location: &Url, callback_url: &Url) -> Self {
        let same_endpoint = location.scheme() == callback_url.scheme()
            && location.host_str() == callback_url.host_str()
            && location.port_or_known_default() == callback_url.port_or_known_default()
            && location.path() == callback_url.path();

        if same_endpoint {
            let value = |key: &str| {
                location
                    .query_pairs()
                    .find(|(k, _)| k == key)
                    .map(|(_, v)| v.into_owned())
                    .filter(|v| !v.is_empty())
            };
            if let (Some(login), Some(otp), Some(state)) =
                (value("login"), value("otp"), value("state"))
            {
                return Self::Grant { login, otp, state };
            }
        }

        Self::Login(location.to_string())
    }
}

/// Response of one `/oauth/authorize` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizeResponse {
    /// Absolute redirect target as received
    pub location: String,
    /// Classified redirect
    pub redirect: AuthorizeRedirect,
}

/// HTTP client for the authorization server
#[derive(Debug, Clone)]
pub struct AuthorizationClient {
    http: Client,
    authorize_url: Url,
    callback_url: Url,
    client_id: String,
}

impl AuthorizationClient {
    /// Build a client for `config`
    ///
    /// # Errors
    ///
    /// Returns a config error if either base URL is not absolute, or if the
    /// HTTP client cannot be built
    pub fn new(config: &ResourceServerConfig) -> AppResult<Self> {
        let http = Client::builder()
            .redirect(Policy::none())
            .timeout(config.upstream_timeout)
            .build()
            .map_err(|e| AppError::config("failed to build HTTP client").with_source(e))?;

        Ok(Self {
            http,
            authorize_url: endpoint(&config.auth_backend_url, routes::AUTHORIZE, "AUTH_BACKEND_URL")?,
            callback_url: endpoint(&config.backend_url, routes::CALLBACK, "BACKEND_URL")?,
            client_id: config.client_id.clone(),
        })
    }

    /// Our own `/callback` URL, sent as `redirect_uri`
    #[must_use]
    pub const fn callback_url(&self) -> &Url {
        &self.callback_url
    }

    /// Authorization request URL for `session_id`
    #[must_use]
    pub fn authorize_request_url(&self, session_id: &str) -> Url {
        let mut url = self.authorize_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("response_type", protocol::RESPONSE_TYPE_GAME_AUTH)
            .append_pair("redirect_uri", self.callback_url.as_str())
            .append_pair("state", session_id);
        url
    }

    /// Call `/oauth/authorize` with `state = session_id`
    ///
    /// A returning browser (`forward_cookie`) has its session cookie replayed
    /// so the authorization server can recognize it.
    ///
    /// # Errors
    ///
    /// `UpstreamFailure` on a network error, a non-302 status, or a 302 with
    /// no usable `Location`
    pub async fn authorize(
        &self,
        session_id: &str,
        forward_cookie: bool,
    ) -> AppResult<AuthorizeResponse> {
        let request_url = self.authorize_request_url(session_id);
        debug!(url = %request_url, forward_cookie, "sending authorization request");

        let mut request = self.http.get(request_url.clone());
        if forward_cookie {
            request = request.header(header::COOKIE, format!("{SESSION_COOKIE_NAME}={session_id}"));
        }

        let response = request.send().await.map_err(|e| {
            AppError::upstream(format!("authorization request failed: {e}")).with_source(e)
        })?;

        if response.status() != StatusCode::FOUND {
            debug!(status = %response.status(), "unexpected authorization response");
            return Err(AppError::upstream("Failed to redirect"));
        }

        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| request_url.join(value).ok())
            .ok_or_else(|| AppError::upstream("Failed to retrieve redirect location"))?;

        Ok(AuthorizeResponse {
            redirect: AuthorizeRedirect::classify(&location, &self.callback_url),
            location: location.into(),
        })
    }
}

fn endpoint(base: &str, path: &str, key: &str) -> AppResult<Url> {
    let joined = format!("{}{path}", base.trim_end_matches('/'));
    Url::parse(&joined)
        .map_err(|e| AppError::config(format!("Invalid {key} value: {base}")).with_source(e))
}
