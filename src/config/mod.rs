// ABOUTME: Configuration management module for both services
// ABOUTME: Environment-driven settings for the authorization server and the game backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **Environment**: per-service configuration loaded from environment variables

/// Environment and server configuration
pub mod environment;

pub use environment::{AuthServerConfig, CookieConfig, CorsConfig, ResourceServerConfig};
