// ABOUTME: Environment configuration for the authorization server and the game backend
// ABOUTME: Parses client/user registration, peer base URLs, ports, and cookie/CORS settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! Both services read their settings once at startup. `from_env` reads the
//! process environment; `from_lookup` takes any key lookup so tests stay
//! hermetic.

use crate::errors::{AppError, AppResult};
use game_auth_core::constants::defaults;
use std::env;
use std::fmt;
use std::time::Duration;
use tracing::info;

/// Session cookie settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CookieConfig {
    /// Add the `Secure` attribute to the session cookie
    pub secure: bool,
}

/// CORS settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    /// `*` (mirror the request origin) or a comma-separated origin list
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "*".to_owned(),
        }
    }
}

/// Authorization server configuration
#[derive(Clone)]
pub struct AuthServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// The registered client ID
    pub client_id: String,
    /// The registered username
    pub username: String,
    /// The registered user's password
    pub password: String,
    /// Base URL of the login frontend
    pub auth_frontend_url: String,
    /// Session cookie settings
    pub cookie: CookieConfig,
    /// CORS settings
    pub cors: CorsConfig,
}

impl AuthServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a config error if a required variable is missing or a value is malformed
    pub fn from_env() -> AppResult<Self> {
        info!("Loading authorization server configuration from environment variables");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Returns a config error if a required variable is missing or a value is malformed
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        Ok(Self {
            http_port: parse_port(&lookup)?,
            client_id: required(&lookup, "CLIENT_ID")?,
            username: required(&lookup, "USER")?,
            password: required(&lookup, "PASSWORD")?,
            auth_frontend_url: required(&lookup, "AUTH_FRONTEND")?,
            cookie: parse_cookie(&lookup)?,
            cors: parse_cors(&lookup),
        })
    }

    /// One-line summary safe for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "port={} client_id={} user={} auth_frontend={} secure_cookie={}",
            self.http_port,
            self.client_id,
            self.username,
            self.auth_frontend_url,
            self.cookie.secure
        )
    }
}

impl fmt::Debug for AuthServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthServerConfig")
            .field("http_port", &self.http_port)
            .field("client_id", &self.client_id)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("auth_frontend_url", &self.auth_frontend_url)
            .field("cookie", &self.cookie)
            .field("cors", &self.cors)
            .finish()
    }
}

/// Game backend (resource server) configuration
#[derive(Debug, Clone)]
pub struct ResourceServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Client ID registered with the authorization server
    pub client_id: String,
    /// Base URL of the authorization server
    pub auth_backend_url: String,
    /// Externally reachable base URL of this server, used for `redirect_uri`
    pub backend_url: String,
    /// Timeout for calls to the authorization server
    pub upstream_timeout: Duration,
    /// Session cookie settings
    pub cookie: CookieConfig,
    /// CORS settings
    pub cors: CorsConfig,
}

impl ResourceServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a config error if a required variable is missing or a value is malformed
    pub fn from_env() -> AppResult<Self> {
        info!("Loading game backend configuration from environment variables");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Returns a config error if a required variable is missing or a value is malformed
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let timeout_secs = match lookup("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) if !raw.trim().is_empty() => raw.trim().parse::<u64>().map_err(|e| {
                AppError::config(format!("Invalid UPSTREAM_TIMEOUT_SECS value: {raw}"))
                    .with_source(e)
            })?,
            _ => defaults::UPSTREAM_TIMEOUT_SECS,
        };

        Ok(Self {
            http_port: parse_port(&lookup)?,
            client_id: required(&lookup, "CLIENT_ID")?,
            auth_backend_url: required(&lookup, "AUTH_BACKEND_URL")?,
            backend_url: required(&lookup, "BACKEND_URL")?,
            upstream_timeout: Duration::from_secs(timeout_secs),
            cookie: parse_cookie(&lookup)?,
            cors: parse_cors(&lookup),
        })
    }

    /// One-line summary safe for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "port={} client_id={} auth_backend={} backend={} upstream_timeout={}s",
            self.http_port,
            self.client_id,
            self.auth_backend_url,
            self.backend_url,
            self.upstream_timeout.as_secs()
        )
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> AppResult<String> {
    lookup(key)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::config(format!("{key} environment variable is required")))
}

fn parse_port(lookup: &impl Fn(&str) -> Option<String>) -> AppResult<u16> {
    match lookup("HTTP_PORT") {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse().map_err(|e| {
            AppError::config(format!("Invalid HTTP_PORT value: {raw}")).with_source(e)
        }),
        _ => Ok(defaults::HTTP_PORT),
    }
}

fn parse_cookie(lookup: &impl Fn(&str) -> Option<String>) -> AppResult<CookieConfig> {
    let secure = match lookup("COOKIE_SECURE").as_deref().map(str::trim) {
        None | Some("") => false,
        Some(raw) => parse_bool(raw)
            .ok_or_else(|| AppError::config(format!("Invalid COOKIE_SECURE value: {raw}")))?,
    };
    Ok(CookieConfig { secure })
}

fn parse_cors(lookup: &impl Fn(&str) -> Option<String>) -> CorsConfig {
    lookup("CORS_ALLOWED_ORIGINS")
        .filter(|value| !value.trim().is_empty())
        .map_or_else(CorsConfig::default, |allowed_origins| CorsConfig {
            allowed_origins,
        })
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
