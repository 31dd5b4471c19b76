// ABOUTME: Session store abstraction with a concurrent in-memory implementation
// ABOUTME: Handlers depend on the trait so tests and durable backends can be swapped in
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppResult;
use dashmap::DashMap;

/// Key/value table of sessions keyed by correlation session ID
///
/// Every mutation is a single key write; the data model has no cross-key
/// invariants, so no transactional API is offered.
#[async_trait::async_trait]
pub trait SessionStore<T: Send + 'static>: Send + Sync {
    /// Fetch the value stored under `id`
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend fails
    async fn get(&self, id: &str) -> AppResult<Option<T>>;

    /// Store `value` under `id`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend fails
    async fn put(&self, id: &str, value: T) -> AppResult<()>;
}

/// Volatile session table
///
/// `DashMap` shards its locks, so concurrent handlers read and write without
/// an external mutex. Entries live for the lifetime of the process.
#[derive(Debug)]
pub struct InMemorySessionStore<T> {
    entries: DashMap<String, T>,
}

impl<T> InMemorySessionStore<T> {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Number of stored sessions
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no session has been stored yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for InMemorySessionStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl<T> SessionStore<T> for InMemorySessionStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn get(&self, id: &str) -> AppResult<Option<T>> {
        Ok(self.entries.get(id).map(|entry| entry.value().clone()))
    }

    async fn put(&self, id: &str, value: T) -> AppResult<()> {
        self.entries.insert(id.to_owned(), value);
        Ok(())
    }
}
