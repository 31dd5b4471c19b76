// ABOUTME: Lenient urlencoded parameter parsing shared by every protocol endpoint
// ABOUTME: First occurrence of a key wins; repeated keys never reject the request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

/// Decoded parameters from one or more urlencoded sources
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    values: HashMap<String, String>,
}

impl QueryParams {
    /// Parse sources in priority order
    ///
    /// A key seen in an earlier source shadows later ones; within a source the
    /// first occurrence wins.
    #[must_use]
    pub fn parse<'a>(sources: impl IntoIterator<Item = &'a [u8]>) -> Self {
        let mut values = HashMap::new();
        for source in sources {
            for (key, value) in url::form_urlencoded::parse(source) {
                values
                    .entry(key.into_owned())
                    .or_insert_with(|| value.into_owned());
            }
        }
        Self { values }
    }

    /// Parse a raw query string, absent meaning empty
    #[must_use]
    pub fn from_raw(raw_query: Option<&str>) -> Self {
        Self::parse(raw_query.map(str::as_bytes))
    }

    /// Remove and return `key`, empty if absent
    pub fn take(&mut self, key: &str) -> String {
        self.values.remove(key).unwrap_or_default()
    }
}
