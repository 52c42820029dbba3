// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request as handed over by the interception host

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One observed HTTP request. Owned by the host, read-only to the hook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterceptedRequest {
    /// Full request URL as observed
    pub url: String,
    /// Header name to value, names in the casing they were received with
    pub headers: HashMap<String, String>,
}

impl InterceptedRequest {
    /// Create a request with no headers
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
        }
    }

    /// Add a header, keeping the name's casing
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Exact-name lookup, no case folding
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Header names present, sorted for stable diagnostics
    pub fn header_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.headers.keys().cloned().collect();
        names.sort();
        names
    }
}
