// ABOUTME: CORS middleware configuration for the browser-facing endpoints
// ABOUTME: Mirrors the caller origin with credentials so the session cookie travels cross-origin
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::CorsConfig;
use http::{header::HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Configure CORS settings for a service
///
/// The frontends call both services from another origin and rely on the
/// `auth_session_id` cookie, so credentials are always allowed. A wildcard
/// cannot be combined with credentials; `*` therefore mirrors the request's
/// `Origin` header instead.
///
/// # Examples
///
/// ```bash
/// # Mirror any origin (development)
/// export CORS_ALLOWED_ORIGINS="*"
///
/// # Allow specific origins (production)
/// export CORS_ALLOWED_ORIGINS="https://game.example.com,https://login.example.com"
/// ```
pub fn setup_cors(config: &CorsConfig) -> CorsLayer {
    let allow_origin = if config.allowed_origins.is_empty() || config.allowed_origins == "*" {
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    HeaderValue::from_str(trimmed).ok()
                }
            })
            .collect();

        if origins.is_empty() {
            AllowOrigin::mirror_request()
        } else {
            AllowOrigin::list(origins)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_credentials(true)
        .allow_headers([HeaderName::from_static("content-type")])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
}
