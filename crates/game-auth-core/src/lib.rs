// ABOUTME: Core types and constants for the game login/OTP authorization hand-off
// ABOUTME: Foundation crate with error handling, protocol constants, and session models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Game Auth Core
//!
//! Shared types for the authorization server and the game backend. This crate
//! has no HTTP framework dependency unless the `http-response` feature is on.
//!
//! ## Modules
//!
//! - **errors**: `AppError` and `ErrorCode`, one code per protocol failure kind
//! - **constants**: cookie names, protocol literals, routes, and defaults
//! - **models**: registered clients/users, login credentials, resource sessions

/// Unified error handling with distinguishable protocol error kinds
pub mod errors;

/// Protocol literals, route paths, and configuration defaults
pub mod constants;

/// Directory entries and session records exchanged by both services
pub mod models;
