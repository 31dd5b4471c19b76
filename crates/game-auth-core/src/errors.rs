// ABOUTME: Unified error type for the authorization server and the game backend
// ABOUTME: Keeps every protocol failure kind distinguishable while mapping bluntly to HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! Every handler returns `AppResult<T>`. Errors are terminal for the current
//! request: there is no retry or local recovery. At the HTTP boundary every
//! kind becomes a 500 with the error text as body, except an unknown session
//! on the game backend which is a 404. `ErrorCode::protocol_status` keeps a
//! finer mapping for callers that want one.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error kinds raised by the hand-off protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A required parameter is missing or malformed
    InvalidRequest,
    /// `/oauth/authorize` was called by an unregistered client
    UnauthorizedClient,
    /// `/oauth/token` was called by an unregistered client
    ClientNotFound,
    /// The submitted username is not registered
    UserNotFound,
    /// The submitted password does not match
    WrongPassword,
    /// Unknown `response_type`
    UnsupportedResponseType,
    /// Unknown `grant_type`
    UnsupportedGrantType,
    /// Unexpected status or network failure from a downstream HTTP call
    UpstreamFailure,
    /// No session stored under the requested ID
    SessionNotFound,
    /// Session store backend failure
    StorageError,
    /// Startup configuration is missing or invalid
    ConfigError,
    /// Anything else
    InternalError,
}

impl ErrorCode {
    /// HTTP status used at the service boundary
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::SessionNotFound => 404,
            _ => 500,
        }
    }

    /// Finer-grained status for each kind, not applied at the boundary
    #[must_use]
    pub const fn protocol_status(self) -> u16 {
        match self {
            Self::InvalidRequest | Self::UnsupportedResponseType | Self::UnsupportedGrantType => {
                400
            }
            Self::UnauthorizedClient
            | Self::ClientNotFound
            | Self::UserNotFound
            | Self::WrongPassword => 401,
            Self::SessionNotFound => 404,
            Self::UpstreamFailure => 502,
            Self::StorageError | Self::ConfigError | Self::InternalError => 500,
        }
    }

    /// Short, stable description of this kind
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidRequest => "The request is missing a required parameter",
            Self::UnauthorizedClient => "The client is not registered",
            Self::ClientNotFound => "The client was not found",
            Self::UserNotFound => "The user was not found",
            Self::WrongPassword => "The password does not match",
            Self::UnsupportedResponseType => "The response type is not supported",
            Self::UnsupportedGrantType => "The grant type is not supported",
            Self::UpstreamFailure => "The authorization server call failed",
            Self::SessionNotFound => "The session was not found",
            Self::StorageError => "Session storage failed",
            Self::ConfigError => "Configuration error encountered",
            Self::InternalError => "An internal server error occurred",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Unified error type for the application
///
/// `Display` yields only the message, which is what the boundary writes as
/// the response body.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AppError {
    /// Error kind
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// HTTP status code for this error at the service boundary
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Missing or malformed request parameter
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Unregistered client on the authorization endpoint
    #[must_use]
    pub fn unauthorized_client() -> Self {
        Self::new(ErrorCode::UnauthorizedClient, "unauthorized_client")
    }

    /// Unregistered client on the token endpoint
    #[must_use]
    pub fn client_not_found() -> Self {
        Self::new(ErrorCode::ClientNotFound, "client not found")
    }

    /// Unknown username
    #[must_use]
    pub fn user_not_found() -> Self {
        Self::new(ErrorCode::UserNotFound, "user not found")
    }

    /// Password mismatch
    #[must_use]
    pub fn wrong_password() -> Self {
        Self::new(ErrorCode::WrongPassword, "wrong password")
    }

    /// Unknown `response_type`
    #[must_use]
    pub fn unsupported_response_type() -> Self {
        Self::new(ErrorCode::UnsupportedResponseType, "unsupported_response_type")
    }

    /// Unknown `grant_type`
    #[must_use]
    pub fn unsupported_grant_type() -> Self {
        Self::new(ErrorCode::UnsupportedGrantType, "unsupported_grant_type")
    }

    /// Downstream HTTP failure
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamFailure, message)
    }

    /// Unknown session ID
    pub fn session_not_found(session_id: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::SessionNotFound,
            format!("session {} not found", session_id.into()),
        )
    }

    /// Session store failure
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

#[cfg(feature = "http-response")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = http::StatusCode::from_u16(self.http_status())
            .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);

        if status == http::StatusCode::NOT_FOUND {
            tracing::debug!(code = ?self.code, "{}", self.message);
            return status.into_response();
        }

        tracing::warn!(code = ?self.code, source = ?self.source, "request failed: {}", self.message);
        (status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_status_is_blunt() {
        assert_eq!(ErrorCode::InvalidRequest.http_status(), 500);
        assert_eq!(ErrorCode::WrongPassword.http_status(), 500);
        assert_eq!(ErrorCode::UpstreamFailure.http_status(), 500);
        assert_eq!(ErrorCode::SessionNotFound.http_status(), 404);
    }

    #[test]
    fn test_protocol_status_keeps_kinds_apart() {
        assert_eq!(ErrorCode::UnsupportedGrantType.protocol_status(), 400);
        assert_eq!(ErrorCode::UnauthorizedClient.protocol_status(), 401);
        assert_eq!(ErrorCode::UpstreamFailure.protocol_status(), 502);
    }

    #[test]
    fn test_display_is_error_text() {
        assert_eq!(
            AppError::unsupported_grant_type().to_string(),
            "unsupported_grant_type"
        );
        assert_eq!(AppError::wrong_password().to_string(), "wrong password");
        assert_eq!(
            AppError::invalid_request("session_id required").to_string(),
            "session_id required"
        );
    }

    #[test]
    fn test_error_code_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorCode::UnsupportedResponseType).unwrap_or_default();
        assert_eq!(json, "\"unsupported_response_type\"");
    }
}
