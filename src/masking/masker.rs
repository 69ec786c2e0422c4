// ABOUTME: Masking engine applying ordered redaction rules to log messages
// ABOUTME: Implements the fixed-width and reveal-prefix replacement policies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Rule application.
//!
//! Rules run in list order, each over the output of the previous one, so
//! a later rule can match text a previous rule already rewrote. A rule
//! that cannot be used (empty or invalid pattern) is skipped with a
//! warning and the remaining rules still apply; masking is best-effort
//! and never fails a request.

use regex::Captures;
use tracing::warn;

use super::cache::PatternCache;
use super::MaskingRule;
use crate::constants::FULL_MASK_WIDTH;

/// Applies ordered masking rules to log messages.
#[derive(Debug, Clone, Default)]
pub struct DataMasker {
    cache: PatternCache,
}

impl DataMasker {
    /// Create a masker with an empty pattern cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The pattern cache backing this masker.
    #[must_use]
    pub const fn cache(&self) -> &PatternCache {
        &self.cache
    }

    /// Redact `content` by applying every rule in order.
    ///
    /// Blank content or an empty rule list returns the input unchanged.
    /// Replacement strings are inserted literally, so mask characters that
    /// look like regex capture references (`$1`) are never expanded.
    #[must_use]
    pub fn mask(&self, content: &str, rules: &[MaskingRule]) -> String {
        if content.trim().is_empty() || rules.is_empty() {
            return content.to_owned();
        }

        let mut masked = content.to_owned();
        for rule in rules {
            masked = self.apply_rule(&masked, rule);
        }
        masked
    }

    /// Apply one rule, returning the input unchanged when the rule is
    /// unusable.
    fn apply_rule(&self, content: &str, rule: &MaskingRule) -> String {
        if rule.pattern.is_empty() {
            warn!("Skipping masking rule with empty pattern");
            return content.to_owned();
        }

        self.cache.compile(&rule.pattern).map_or_else(
            |e| {
                warn!(pattern = %rule.pattern, error = %e, "Skipping unusable masking rule");
                content.to_owned()
            },
            |regex| {
                regex
                    .replace_all(content, |caps: &Captures<'_>| mask_match(&caps[0], rule))
                    .into_owned()
            },
        )
    }
}

/// Build the replacement for a single match according to the reveal
/// policy.
///
/// Full redaction always yields [`FULL_MASK_WIDTH`] mask characters so
/// the output never reveals the original match length. When a prefix is
/// revealed, the mask suffix is capped at the same width.
fn mask_match(matched: &str, rule: &MaskingRule) -> String {
    let visible = usize::try_from(rule.visible_characters).unwrap_or(0);
    if visible == 0 {
        return rule.mask_character.repeat(FULL_MASK_WIDTH);
    }

    let match_len = matched.chars().count();
    if visible >= match_len {
        return matched.to_owned();
    }

    let prefix: String = matched.chars().take(visible).collect();
    let mask_len = (match_len - visible).min(FULL_MASK_WIDTH);
    format!("{prefix}{}", rule.mask_character.repeat(mask_len))
}
