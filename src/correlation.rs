// ABOUTME: Correlation identifier adoption, generation, and span scoping
// ABOUTME: Adopts inbound X-Correlation-ID headers or generates fresh UUIDs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Per-call correlation.
//!
//! Every logged call carries one correlation identifier: the inbound
//! `X-Correlation-ID` header value when present and non-blank, otherwise
//! a freshly generated UUID. The middleware inserts the identifier into
//! request extensions so downstream handlers can tag their own logs with
//! it, and scopes the rest of the pipeline under a span carrying it.
//!
//! The identifier is never written onto the outbound response; callers
//! that want it echoed attach it themselves.

use http::{HeaderMap, Method};
use uuid::Uuid;

use crate::constants::CORRELATION_ID_HEADER;

/// Per-call correlation identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Adopt the inbound header value, or generate a fresh identifier
    /// when the header is absent, unreadable, or blank.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map_or_else(Self::generate, |value| Self(value.to_owned()))
    }

    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Create the span that scopes one logged call.
///
/// The span carries the correlation identifier plus method and path;
/// `status_code` is recorded once the handler returns. Dropping the span
/// ends the correlation scope on every exit path, which is what keeps
/// per-call state from leaking into an unrelated call on a reused
/// worker.
#[must_use]
pub fn create_call_span(
    correlation_id: &CorrelationId,
    method: &Method,
    path: &str,
) -> tracing::Span {
    tracing::info_span!(
        "http_call",
        correlation_id = %correlation_id,
        method = %method,
        path = %path,
        status_code = tracing::field::Empty,
    )
}
