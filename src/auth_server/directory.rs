// ABOUTME: Registered client and user directories built once at startup
// ABOUTME: Immutable after construction, shared by reference across request handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use game_auth_core::models::{RegisteredClient, RegisteredUser};
use std::collections::HashMap;

/// Resource servers allowed to request authorization
#[derive(Debug, Clone, Default)]
pub struct ClientRegistry {
    clients: HashMap<String, RegisteredClient>,
}

impl ClientRegistry {
    /// Build the registry from its entries
    pub fn new(clients: impl IntoIterator<Item = RegisteredClient>) -> Self {
        Self {
            clients: clients
                .into_iter()
                .map(|client| (client.client_id.clone(), client))
                .collect(),
        }
    }

    /// Whether `client_id` is registered
    #[must_use]
    pub fn contains(&self, client_id: &str) -> bool {
        self.clients.contains_key(client_id)
    }
}

/// End-user identities accepted by the token endpoint
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: HashMap<String, RegisteredUser>,
}

impl UserDirectory {
    /// Build the directory from its entries, keyed by username
    pub fn new(users: impl IntoIterator<Item = RegisteredUser>) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|user| (user.username.clone(), user))
                .collect(),
        }
    }

    /// Look up a user by username
    #[must_use]
    pub fn find(&self, username: &str) -> Option<&RegisteredUser> {
        self.users.get(username)
    }
}
