// ABOUTME: Concurrent compile-once cache for masking regex patterns
// ABOUTME: Memoizes compiled patterns by source string with lock-free reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Pattern cache.
//!
//! Masking rules are matched on every logged call, so their regexes are
//! compiled once and memoized by source string. The cache is shared by
//! all in-flight calls; concurrent misses on the same source may race to
//! compile, in which case the first stored entry wins and the duplicate
//! work is discarded. Compilation failures are never cached.

use dashmap::DashMap;
use regex::{Regex, RegexBuilder};
use std::sync::Arc;

use crate::errors::{LogmaskError, Result};

/// Concurrent memoization of compiled masking patterns, keyed by source.
///
/// Clones share the same underlying map, so a cache embedded in shared
/// middleware state can also be handed to tests or admin tooling.
#[derive(Debug, Clone, Default)]
pub struct PatternCache {
    patterns: Arc<DashMap<String, Arc<Regex>>>,
}

impl PatternCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the compiled form of `source`, compiling it on first use.
    ///
    /// Patterns compile case-insensitively, matching how masking rules are
    /// declared. Repeated calls with the same source return the cached
    /// object without recompiling.
    ///
    /// # Errors
    ///
    /// Returns [`LogmaskError::InvalidPattern`] when `source` is not a
    /// valid regular expression. The failure is not cached, so a later
    /// call with the same source recompiles.
    pub fn compile(&self, source: &str) -> Result<Arc<Regex>> {
        if let Some(existing) = self.patterns.get(source) {
            return Ok(Arc::clone(existing.value()));
        }

        let compiled = RegexBuilder::new(source)
            .case_insensitive(true)
            .build()
            .map_err(|e| LogmaskError::invalid_pattern(source, e))?;

        // On a race the entry API keeps the first writer's value and this
        // compile result is dropped.
        let entry = self
            .patterns
            .entry(source.to_owned())
            .or_insert_with(|| Arc::new(compiled));
        Ok(Arc::clone(entry.value()))
    }

    /// Drop every cached pattern.
    ///
    /// Used for test isolation and for reloading rule sets at runtime.
    pub fn clear(&self) {
        self.patterns.clear();
    }

    /// Number of distinct pattern sources currently cached.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the cache holds no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
