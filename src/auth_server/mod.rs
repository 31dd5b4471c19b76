// ABOUTME: Authorization server owning the client/user directories and the browser session table
// ABOUTME: Decides whether a browser session is authenticated and issues login/OTP pairs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Authorization state machine for `/oauth/authorize`
pub mod authorize;
/// Registered client and user directories
pub mod directory;
/// `login_otp` credential grant for `/oauth/token`
pub mod grant;
/// HTTP handlers
pub mod routes;

pub use authorize::{AuthorizeDecision, AuthorizeParams, AuthorizeRequest};
pub use directory::{ClientRegistry, UserDirectory};
pub use grant::{GrantType, TokenParams};
pub use routes::AuthServerRoutes;

use crate::config::{AuthServerConfig, CorsConfig};
use crate::middleware::with_http_layers;
use crate::routes::HealthRoutes;
use crate::session::{InMemorySessionStore, SessionCookie, SessionStore};
use axum::Router;
use game_auth_core::constants::service_names;
use game_auth_core::models::{LoginCredential, RegisteredClient, RegisteredUser};
use std::sync::Arc;

/// Browser session table: session ID to the login/OTP issued for it
pub type BrowserSessionStore = dyn SessionStore<LoginCredential>;

/// Everything the authorization server handlers share
///
/// Built once at startup and injected into the router; there is no ambient
/// global state.
pub struct AuthServerResources {
    /// Registered clients
    pub clients: ClientRegistry,
    /// Registered users
    pub users: UserDirectory,
    /// Authenticated browser sessions
    pub sessions: Arc<BrowserSessionStore>,
    /// Login frontend base URL
    pub login_frontend_url: String,
    /// Session cookie issuer
    pub session_cookie: SessionCookie,
}

impl AuthServerResources {
    /// Resources for `config` with an in-memory session table
    #[must_use]
    pub fn new(config: &AuthServerConfig) -> Self {
        Self::with_store(config, Arc::new(InMemorySessionStore::<LoginCredential>::new()))
    }

    /// Resources for `config` backed by the given session table
    #[must_use]
    pub fn with_store(config: &AuthServerConfig, sessions: Arc<BrowserSessionStore>) -> Self {
        Self {
            clients: ClientRegistry::new([RegisteredClient::new(config.client_id.clone())]),
            users: UserDirectory::new([RegisteredUser::new(
                config.username.clone(),
                config.password.clone(),
            )]),
            sessions,
            login_frontend_url: config.auth_frontend_url.clone(),
            session_cookie: SessionCookie::new(config.cookie.secure),
        }
    }
}

/// Complete authorization server application: protocol routes, health, HTTP layers
pub fn app(resources: Arc<AuthServerResources>, cors: &CorsConfig) -> Router {
    let router = AuthServerRoutes::routes(resources)
        .merge(HealthRoutes::routes(service_names::AUTH_SERVER));
    with_http_layers(router, cors)
}
