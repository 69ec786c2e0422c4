// ABOUTME: Shared constant values used across the logging pipeline
// ABOUTME: Header names, environment signals, placeholders, and masking bounds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Constants for the logging pipeline.
//!
//! Centralizes the wire-level names and policy values the rest of the
//! crate agrees on, so tests and host applications reference one source.

/// HTTP header carrying the inbound correlation identifier.
///
/// Read from incoming requests only; the middleware never writes it onto
/// outbound responses.
pub const CORRELATION_ID_HEADER: &str = "X-Correlation-ID";

/// Process variable naming the active deployment environment.
pub const ENVIRONMENT_VAR: &str = "ENVIRONMENT";

/// Environment assumed when [`ENVIRONMENT_VAR`] is absent or blank.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Content types whose bodies are textual and safe to include in logs.
///
/// Matching is by substring, so parameterized values such as
/// `application/json; charset=utf-8` are accepted.
pub const TEXTUAL_CONTENT_TYPES: &[&str] =
    &["application/json", "application/xml", "text/plain"];

/// Width of the fixed mask emitted when a rule hides an entire match.
///
/// Full redaction always produces this many mask characters so the
/// replacement never leaks the original value's length.
pub const FULL_MASK_WIDTH: usize = 8;

/// Placeholder logged when captured bytes cannot be decoded as text.
pub const BODY_DECODE_ERROR_PLACEHOLDER: &str = "[Error extracting body]";
