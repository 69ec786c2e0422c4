// ABOUTME: Sensitive-data masking for assembled log messages
// ABOUTME: Rule definitions plus the engine and pattern cache submodules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Masking engine.
//!
//! A [`MaskingRule`] pairs a regex with a reveal policy. The
//! [`DataMasker`] applies an ordered rule list to a message, each rule
//! operating on the output of the previous one, with compiled patterns
//! memoized in a [`PatternCache`] shared across calls.

/// Concurrent memoization of compiled patterns
pub mod cache;

/// Rule application and the per-match reveal policy
pub mod masker;

pub use cache::PatternCache;
pub use masker::DataMasker;

use serde::{Deserialize, Serialize};

/// A single redaction rule.
///
/// Patterns compile case-insensitively. `visible_characters` controls how
/// much of each match stays readable: zero or negative hides the whole
/// match behind a fixed-width mask, while a positive count keeps that many
/// leading characters and masks a bounded suffix.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskingRule {
    /// Regex source matched against assembled log messages.
    pub pattern: String,
    /// String repeated to form the mask.
    #[serde(alias = "maskCharacter")]
    pub mask_character: String,
    /// Leading characters of each match left readable.
    #[serde(alias = "visibleCharacters")]
    pub visible_characters: i32,
}

impl Default for MaskingRule {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            mask_character: "*".to_owned(),
            visible_characters: 0,
        }
    }
}

impl MaskingRule {
    /// Create a rule that fully masks every match of `pattern`.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Self::default()
        }
    }

    /// Keep the first `visible_characters` characters of each match
    /// readable.
    #[must_use]
    pub const fn with_visible_characters(mut self, visible_characters: i32) -> Self {
        self.visible_characters = visible_characters;
        self
    }

    /// Use `mask_character` instead of the default `*`.
    #[must_use]
    pub fn with_mask_character(mut self, mask_character: impl Into<String>) -> Self {
        self.mask_character = mask_character.into();
        self
    }
}
