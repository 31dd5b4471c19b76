// ABOUTME: Game backend (resource server) delegating authentication to the authorization server
// ABOUTME: Owns the ResourceSession table and the outbound authorization client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Outbound `/oauth/authorize` client
pub mod client;
/// HTTP handlers
pub mod routes;

pub use client::{AuthorizationClient, AuthorizeRedirect, AuthorizeResponse};
pub use routes::{AuthResponse, ResourceServerRoutes};

use crate::config::{CorsConfig, ResourceServerConfig};
use crate::errors::AppResult;
use crate::middleware::with_http_layers;
use crate::routes::HealthRoutes;
use crate::session::{InMemorySessionStore, SessionCookie, SessionStore};
use axum::Router;
use game_auth_core::constants::service_names;
use game_auth_core::models::ResourceSession;
use std::sync::Arc;

/// Resource session table: session ID to the flow's state
pub type ResourceSessionStore = dyn SessionStore<ResourceSession>;

/// Everything the game backend handlers share
pub struct ResourceServerResources {
    /// Flow state keyed by correlation session ID
    pub sessions: Arc<ResourceSessionStore>,
    /// Authorization server client
    pub authorization_client: AuthorizationClient,
    /// Session cookie issuer
    pub session_cookie: SessionCookie,
}

impl ResourceServerResources {
    /// Resources for `config` with an in-memory session table
    ///
    /// # Errors
    ///
    /// Returns a config error if the configured URLs are unusable
    pub fn new(config: &ResourceServerConfig) -> AppResult<Self> {
        Self::with_store(config, Arc::new(InMemorySessionStore::<ResourceSession>::new()))
    }

    /// Resources for `config` backed by the given session table
    ///
    /// # Errors
    ///
    /// Returns a config error if the configured URLs are unusable
    pub fn with_store(
        config: &ResourceServerConfig,
        sessions: Arc<ResourceSessionStore>,
    ) -> AppResult<Self> {
        Ok(Self {
            sessions,
            authorization_client: AuthorizationClient::new(config)?,
            session_cookie: SessionCookie::new(config.cookie.secure),
        })
    }
}

/// Complete game backend application: hand-off routes, health, HTTP layers
pub fn app(resources: Arc<ResourceServerResources>, cors: &CorsConfig) -> Router {
    let router = ResourceServerRoutes::routes(resources)
        .merge(HealthRoutes::routes(service_names::GAME_BACKEND));
    with_http_layers(router, cors)
}
