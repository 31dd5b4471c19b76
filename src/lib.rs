// ABOUTME: Main library entry point for the game login/OTP authorization hand-off
// ABOUTME: Provides the authorization server, the game backend, and their shared session plumbing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Game Auth
//!
//! A game backend obtains a login/OTP pair for its player by delegating
//! authentication to a separate authorization server, with a browser login
//! step in between.
//!
//! ## Flow
//!
//! 1. The game backend calls `/oauth/authorize` with `state` set to its session ID.
//! 2. An unauthenticated browser is redirected to the login frontend, which
//!    replays the same parameters to `/oauth/token`.
//! 3. `/oauth/token` stores a login/OTP pair under the browser's session cookie.
//! 4. The next `/oauth/authorize` redirects to the game backend's `/callback`
//!    with `login`, `otp`, and `state`, and `/session` hands the pair out.
//!
//! The `auth_session_id` cookie value is the single join key across the
//! browser, the authorization server, and the game backend.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use game_auth::auth_server::{self, AuthServerResources};
//! use game_auth::config::environment::AuthServerConfig;
//! use game_auth::errors::AppResult;
//! use std::sync::Arc;
//!
//! fn main() -> AppResult<()> {
//!     let config = AuthServerConfig::from_env()?;
//!     let resources = Arc::new(AuthServerResources::new(&config));
//!     let _router = auth_server::app(resources, &config.cors);
//!     Ok(())
//! }
//! ```

/// Authorization server: authorize state machine and login/OTP grant
pub mod auth_server;

/// Environment-driven configuration for both services
pub mod config;

/// Structured logging setup
pub mod logging;

/// HTTP middleware: CORS, request IDs, request spans, panic recovery
pub mod middleware;

/// Game backend: authorization delegation, callback, and session retrieval
pub mod resource_server;

/// Routes shared by both services
pub mod routes;

/// HTTP listener and graceful shutdown
pub mod server;

/// Session-ID correlation cookie and session stores
pub mod session;

pub use game_auth_core::{constants, errors, models};
