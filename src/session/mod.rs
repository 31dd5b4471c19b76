// ABOUTME: Session correlation primitive and pluggable session stores
// ABOUTME: The auth_session_id cookie value is the join key shared by browser, auth server, and game backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// `auth_session_id` cookie handling
pub mod cookie;
/// Session store trait and in-memory backend
pub mod store;

pub use cookie::{read_session_id, SessionCookie, SessionId};
pub use store::{InMemorySessionStore, SessionStore};
