// ABOUTME: Error types for the logging pipeline and its configuration surface
// ABOUTME: Distinguishes pattern, configuration-parse, and body-capture failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Error handling for the middleware.
//!
//! The pipeline treats most failures as non-fatal: an invalid masking rule
//! is skipped with a warning and undecodable bytes become a placeholder
//! string. The variants here cover the cases that do surface to callers:
//! pattern compilation (reported per rule), configuration parsing, and
//! body capture (the one instrumentation failure that aborts a call).

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, LogmaskError>;

/// Errors raised by the logging pipeline.
#[derive(Debug, Error)]
pub enum LogmaskError {
    /// A masking or exclusion pattern failed to compile.
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The regex source string that failed to compile.
        pattern: String,
        /// The underlying compilation failure.
        #[source]
        source: regex::Error,
    },

    /// A YAML configuration document could not be parsed.
    #[error("configuration parse error: {0}")]
    YamlConfig(#[from] serde_yaml::Error),

    /// A JSON configuration document could not be parsed.
    #[error("configuration parse error: {0}")]
    JsonConfig(#[from] serde_json::Error),

    /// A request or response body stream could not be buffered.
    #[error("body capture failed: {0}")]
    BodyCapture(#[from] axum::Error),
}

impl LogmaskError {
    /// Create an invalid-pattern error carrying the offending source string.
    #[must_use]
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }
}
