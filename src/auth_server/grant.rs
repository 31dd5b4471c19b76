// ABOUTME: Credential grant for /oauth/token (login_otp grant type)
// ABOUTME: Verifies client and user credentials and mints a login/OTP pair
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::directory::{ClientRegistry, UserDirectory};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::routes::QueryParams;
use game_auth_core::constants::protocol::{GRANT_TYPE_LOGIN_OTP, LOGIN_PREFIX, OTP_PREFIX};
use game_auth_core::models::LoginCredential;
use rand::{rngs::OsRng, Rng};
use subtle::ConstantTimeEq;

/// Supported grant types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantType {
    /// Username/password exchanged for a login/OTP pair
    LoginOtp,
}

impl GrantType {
    /// Parse the `grant_type` parameter
    ///
    /// # Errors
    ///
    /// `unsupported_grant_type` for anything but `login_otp`
    pub fn parse(raw: &str) -> AppResult<Self> {
        match raw {
            GRANT_TYPE_LOGIN_OTP => Ok(Self::LoginOtp),
            _ => Err(AppError::unsupported_grant_type()),
        }
    }
}

/// `/oauth/token` parameters; absent values are empty
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TokenParams {
    /// Requested grant type
    pub grant_type: String,
    /// Submitted username
    pub username: String,
    /// Submitted password
    pub password: String,
    /// Requesting client
    pub client_id: String,
}

impl std::fmt::Debug for TokenParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenParams")
            .field("grant_type", &self.grant_type)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("client_id", &self.client_id)
            .finish()
    }
}

impl TokenParams {
    /// Merge the form body over the query string
    ///
    /// Within each source the first occurrence of a key wins; a key present
    /// in the body shadows the same key in the query.
    #[must_use]
    pub fn from_sources(query: Option<&[u8]>, body: Option<&[u8]>) -> Self {
        let mut values = QueryParams::parse([body, query].into_iter().flatten());
        Self {
            grant_type: values.take("grant_type"),
            username: values.take("username"),
            password: values.take("password"),
            client_id: values.take("client_id"),
        }
    }
}

/// Run the grant named by `params.grant_type`
///
/// # Errors
///
/// `unsupported_grant_type`, `client not found`, `user not found`, or
/// `wrong password`, checked in that order
pub fn grant(
    params: &TokenParams,
    clients: &ClientRegistry,
    users: &UserDirectory,
) -> AppResult<LoginCredential> {
    match GrantType::parse(&params.grant_type)? {
        GrantType::LoginOtp => grant_login_otp(params, clients, users),
    }
}

fn grant_login_otp(
    params: &TokenParams,
    clients: &ClientRegistry,
    users: &UserDirectory,
) -> AppResult<LoginCredential> {
    if !clients.contains(&params.client_id) {
        return Err(AppError::client_not_found());
    }

    let Some(user) = users.find(&params.username) else {
        AppLogger::log_auth_event(&params.username, "login_otp", false, Some("user not found"));
        return Err(AppError::user_not_found());
    };

    let matches: bool = user
        .password
        .as_bytes()
        .ct_eq(params.password.as_bytes())
        .into();
    if !matches {
        AppLogger::log_auth_event(&params.username, "login_otp", false, Some("wrong password"));
        return Err(AppError::wrong_password());
    }

    AppLogger::log_auth_event(&params.username, "login_otp", true, None);
    Ok(issue_credential(&params.username))
}

/// Mint a login/OTP pair for `username`
#[must_use]
pub fn issue_credential(username: &str) -> LoginCredential {
    LoginCredential {
        login: format!("{LOGIN_PREFIX}{username}"),
        otp: generate_otp(),
    }
}

/// `otp:<n>` with `n` a non-negative 63-bit integer from the OS RNG
fn generate_otp() -> String {
    let n: i64 = OsRng.gen_range(0..=i64::MAX);
    format!("{OTP_PREFIX}{n}")
}
