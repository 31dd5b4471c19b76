// ABOUTME: Protocol literals, route paths, and default values shared by both services
// ABOUTME: Keeps wire-level strings (cookie name, grant/response types) in a single place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Session correlation cookie
pub mod cookies {
    /// Name of the cookie carrying the correlation session ID
    pub const SESSION_COOKIE_NAME: &str = "auth_session_id";
    /// The cookie is scoped to the whole path space
    pub const SESSION_COOKIE_PATH: &str = "/";
}

/// Authorization protocol literals
pub mod protocol {
    /// The only supported `response_type` on `/oauth/authorize`
    pub const RESPONSE_TYPE_GAME_AUTH: &str = "game_auth";
    /// The only supported `grant_type` on `/oauth/token`
    pub const GRANT_TYPE_LOGIN_OTP: &str = "login_otp";
    /// Prefix of the login derived from the username
    pub const LOGIN_PREFIX: &str = "lgn:";
    /// Prefix of the generated one-time token
    pub const OTP_PREFIX: &str = "otp:";
}

/// HTTP route paths
pub mod routes {
    /// Authorization endpoint (authorization server)
    pub const AUTHORIZE: &str = "/oauth/authorize";
    /// Token endpoint (authorization server)
    pub const TOKEN: &str = "/oauth/token";
    /// Authorization hand-off entry point (game backend)
    pub const AUTH: &str = "/auth";
    /// Grant redirect target (game backend)
    pub const CALLBACK: &str = "/callback";
    /// Credential retrieval (game backend)
    pub const SESSION: &str = "/session";
    /// Liveness probe (both services)
    pub const HEALTH: &str = "/health";
}

/// Configuration defaults
pub mod defaults {
    /// Listen port used by both services when `HTTP_PORT` is unset
    pub const HTTP_PORT: u16 = 8080;
    /// Outbound timeout for game backend calls to the authorization server
    pub const UPSTREAM_TIMEOUT_SECS: u64 = 10;
}

/// Service names used in logs and health responses
pub mod service_names {
    /// Authorization server
    pub const AUTH_SERVER: &str = "auth-server";
    /// Game backend (resource server)
    pub const GAME_BACKEND: &str = "game-backend";
}
