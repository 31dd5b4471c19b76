// ABOUTME: Get-or-create of the session-ID correlation cookie
// ABOUTME: Mints unguessable IDs for new browsers and re-emits the cookie for returning ones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum_extra::extract::cookie::{Cookie, CookieJar};
use game_auth_core::constants::cookies::{SESSION_COOKIE_NAME, SESSION_COOKIE_PATH};
use uuid::Uuid;

/// Opaque correlation session identifier
pub type SessionId = String;

/// Issues the `auth_session_id` cookie
///
/// Knows nothing about what the ID means to its caller; both services use it
/// unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionCookie {
    secure: bool,
}

impl SessionCookie {
    /// Cookie issuer; `secure` adds the `Secure` attribute
    #[must_use]
    pub const fn new(secure: bool) -> Self {
        Self { secure }
    }

    /// Return the request's session ID, minting one if the cookie is absent or empty
    ///
    /// The returned jar always carries the cookie, so a returning browser gets
    /// it refreshed and a new one receives it. `created` is true iff a new ID
    /// was minted.
    #[must_use]
    pub fn get_or_create(&self, jar: CookieJar) -> (CookieJar, SessionId, bool) {
        let (session_id, created) = match read_session_id(&jar) {
            Some(existing) => (existing, false),
            None => (Uuid::new_v4().to_string(), true),
        };

        let cookie = Cookie::build((SESSION_COOKIE_NAME, session_id.clone()))
            .path(SESSION_COOKIE_PATH)
            .secure(self.secure)
            .build();

        (jar.add(cookie), session_id, created)
    }
}

/// Lookup-only view of the session cookie; empty values count as absent
#[must_use]
pub fn read_session_id(jar: &CookieJar) -> Option<SessionId> {
    jar.get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_owned())
        .filter(|value| !value.is_empty())
}
