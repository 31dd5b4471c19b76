// ABOUTME: Data model for the login/OTP hand-off: directory entries and session records
// ABOUTME: Shared by the authorization server tables and the game backend session table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// A resource server allowed to request authorization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredClient {
    /// Unique client identifier
    pub client_id: String,
}

impl RegisteredClient {
    /// Create a registered client
    #[must_use]
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
        }
    }
}

/// The accepted end-user identity
#[derive(Clone, PartialEq, Eq)]
pub struct RegisteredUser {
    /// User identifier
    pub user_id: String,
    /// Login name, also the directory key
    pub username: String,
    /// Opaque credential secret
    pub password: String,
}

impl RegisteredUser {
    /// Create a user whose ID is its username
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            user_id: username.clone(),
            username,
            password: password.into(),
        }
    }
}

impl fmt::Debug for RegisteredUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredUser")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Login/OTP pair issued on a successful grant
///
/// Serialized as `{"login": ..., "otp": ...}`, which is both the `/oauth/token`
/// response body and the `/session` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredential {
    /// Login derived from the username
    pub login: String,
    /// Randomly generated one-time token
    pub otp: String,
}

/// Game backend view of one authorization flow, keyed by session ID
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSession {
    /// Correlation session ID
    pub id: String,
    /// Game login, empty until the callback arrives
    pub login: String,
    /// One-time token, empty until the callback arrives
    pub otp: String,
}

impl ResourceSession {
    /// Placeholder entry registered when a flow starts
    #[must_use]
    pub fn pending(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Entry populated from a grant redirect
    #[must_use]
    pub fn completed(
        id: impl Into<String>,
        login: impl Into<String>,
        otp: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            login: login.into(),
            otp: otp.into(),
        }
    }

    /// Whether the callback has populated the credential
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.login.is_empty() && !self.otp.is_empty()
    }

    /// Credential view returned by `/session` (empty strings while pending)
    #[must_use]
    pub fn credential(&self) -> LoginCredential {
        LoginCredential {
            login: self.login.clone(),
            otp: self.otp.clone(),
        }
    }
}
