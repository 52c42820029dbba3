// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Credential extraction from a header set
//!
//! Intermediate proxies disagree on header-name casing and the host exposes
//! whatever casing arrived, so lookups walk an explicit priority list of
//! casing variants instead of folding the map:
//!
//! 1. canonical (`Authorization`)
//! 2. all-lowercase (`authorization`)
//! 3. all-uppercase (`AUTHORIZATION`)
//!
//! The first variant present with a non-empty value wins. The value is
//! passed on byte-for-byte.

use std::collections::HashMap;
use std::fmt;

/// Bearer credential captured from a request
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a non-empty value
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Raw value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Never true for a constructed credential
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First `max_chars` characters followed by `...`
    pub fn preview(&self, max_chars: usize) -> String {
        let head: String = self.0.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}

// Never print the full value through Debug.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential({}, {} chars)", self.preview(8), self.len())
    }
}

/// Result of an extraction attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// A usable credential was found under `variant`
    Found {
        credential: Credential,
        variant: String,
    },
    /// None of the variants carried a value
    Absent {
        /// Header names actually present, sorted
        present: Vec<String>,
    },
}

impl Extraction {
    /// The credential, if one was found
    pub fn credential(&self) -> Option<&Credential> {
        match self {
            Extraction::Found { credential, .. } => Some(credential),
            Extraction::Absent { .. } => None,
        }
    }
}

/// Walks casing variants of one header name in priority order
#[derive(Debug, Clone)]
pub struct Extractor {
    variants: Vec<String>,
}

impl Extractor {
    /// Build the priority list from a canonical header name
    pub fn new(canonical: &str) -> Self {
        let mut variants: Vec<String> = Vec::with_capacity(3);
        for candidate in [
            canonical.to_string(),
            canonical.to_lowercase(),
            canonical.to_uppercase(),
        ] {
            if !variants.contains(&candidate) {
                variants.push(candidate);
            }
        }
        Self { variants }
    }

    /// Variants in the order they are checked
    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    /// Extract the credential from a header map
    pub fn extract(&self, headers: &HashMap<String, String>) -> Extraction {
        tracing::debug!(variants = ?self.variants, "Checking credential header variants");

        let mut found = self.variants.iter().filter_map(|name| {
            headers
                .get(name)
                .and_then(|value| Credential::new(value.as_str()))
                .map(|credential| (name, credential))
        });

        let Some((variant, credential)) = found.next() else {
            let mut present: Vec<String> = headers.keys().cloned().collect();
            present.sort();
            return Extraction::Absent { present };
        };

        // Priority wins; disagreeing lower-priority variants are only reported.
        let conflicting: Vec<&String> = found
            .filter(|(_, other)| other != &credential)
            .map(|(name, _)| name)
            .collect();
        if !conflicting.is_empty() {
            tracing::warn!(
                chosen = %variant,
                ignored = ?conflicting,
                "Credential header present under several casings with different values"
            );
        }

        Extraction::Found {
            credential,
            variant: variant.clone(),
        }
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_HEADER_NAME)
    }
}
