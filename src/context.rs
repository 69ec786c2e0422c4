// ABOUTME: Per-call context assembly and log message formatting
// ABOUTME: Two-phase snapshots merged into one immutable record per call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Call context.
//!
//! Each logged call produces two immutable snapshots: a
//! [`RequestSnapshot`] taken before the handler runs and a
//! [`ResponseSnapshot`] taken after it returns. The two merge into one
//! [`RequestContext`] per call, which is never shared across calls and is
//! dropped when the call completes.
//!
//! Headers and query parameters are kept in sorted maps so the rendered
//! log lines are deterministic.

use http::{HeaderMap, Method, StatusCode};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::{Duration, Instant};

use crate::config::InclusionConfig;

/// Fields captured before the handler runs.
#[derive(Debug, Clone)]
pub struct RequestSnapshot {
    /// Correlation identifier adopted or generated for this call.
    pub correlation_id: String,
    /// HTTP method.
    pub method: Method,
    /// Request path, without the query string.
    pub path: String,
    /// Captured headers; empty when header inclusion is off.
    pub headers: BTreeMap<String, String>,
    /// Parsed query parameters; empty when query inclusion is off.
    pub query_params: BTreeMap<String, String>,
    /// Captured request body, when body capture applies.
    pub body: Option<String>,
    /// When the pipeline started handling the call.
    pub started_at: Instant,
}

impl RequestSnapshot {
    /// Assemble the request log line.
    ///
    /// The base segment always carries method and path; headers, query
    /// parameters, and body follow in that order, each gated by its
    /// inclusion flag. The body segment is additionally dropped when the
    /// captured body is blank.
    #[must_use]
    pub fn to_log_message(&self, inclusion: &InclusionConfig) -> String {
        let mut message = format!(
            "Incoming Request | Method: {} | Path: {}",
            self.method, self.path
        );
        if inclusion.headers {
            let _ = write!(message, " | Headers: {:?}", self.headers);
        }
        if inclusion.query_params {
            let _ = write!(message, " | Query Parameters: {:?}", self.query_params);
        }
        if inclusion.body {
            if let Some(body) = non_blank(self.body.as_deref()) {
                let _ = write!(message, " | Body: {body}");
            }
        }
        message
    }
}

/// Fields captured after the handler returns.
#[derive(Debug, Clone)]
pub struct ResponseSnapshot {
    /// Response status code.
    pub status: StatusCode,
    /// Captured response body, when body capture applies.
    pub body: Option<String>,
    /// When the handler returned its response.
    pub ended_at: Instant,
}

/// The complete, immutable record of one logged call.
///
/// Built by merging the pre-call and post-call snapshots. The
/// `additional_info` map is an extension point for host code that wants
/// to attach its own metadata to the record.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Correlation identifier for the call.
    pub correlation_id: String,
    /// HTTP method.
    pub method: Method,
    /// Request path.
    pub path: String,
    /// Captured request headers.
    pub headers: BTreeMap<String, String>,
    /// Captured query parameters.
    pub query_params: BTreeMap<String, String>,
    /// Captured request body.
    pub request_body: Option<String>,
    /// Captured response body.
    pub response_body: Option<String>,
    /// Response status code.
    pub status_code: StatusCode,
    /// When the pipeline started handling the call.
    pub started_at: Instant,
    /// When the handler returned its response.
    pub ended_at: Instant,
    /// Handler execution time, derived from the two timestamps.
    pub execution_time: Duration,
    /// Open-ended metadata attached by host code.
    pub additional_info: BTreeMap<String, serde_json::Value>,
}

impl RequestContext {
    /// Merge the two per-call snapshots into the final record.
    #[must_use]
    pub fn from_snapshots(request: RequestSnapshot, response: ResponseSnapshot) -> Self {
        let execution_time = response.ended_at.duration_since(request.started_at);
        Self {
            correlation_id: request.correlation_id,
            method: request.method,
            path: request.path,
            headers: request.headers,
            query_params: request.query_params,
            request_body: request.body,
            response_body: response.body,
            status_code: response.status,
            started_at: request.started_at,
            ended_at: response.ended_at,
            execution_time,
            additional_info: BTreeMap::new(),
        }
    }

    /// Attach an extra metadata entry to the record.
    #[must_use]
    pub fn with_info(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.additional_info.insert(key.into(), value);
        self
    }

    /// Execution time rendered for log output.
    #[must_use]
    pub fn execution_time_display(&self) -> String {
        format_execution_time(self.execution_time)
    }

    /// Assemble the response log line.
    ///
    /// Status always leads; the body segment follows when body inclusion
    /// is on and the captured body is non-blank, then the execution-time
    /// segment when performance inclusion is on.
    #[must_use]
    pub fn response_message(&self, inclusion: &InclusionConfig) -> String {
        let mut message = format!("Outgoing Response | Status: {}", self.status_code.as_u16());
        if inclusion.body {
            if let Some(body) = non_blank(self.response_body.as_deref()) {
                let _ = write!(message, " | Body: {body}");
            }
        }
        if inclusion.performance {
            let _ = write!(message, " | Execution Time: {}", self.execution_time_display());
        }
        message
    }
}

/// Render an elapsed duration for log output.
///
/// Sub-second durations render in milliseconds; anything longer renders
/// as truncated whole seconds.
#[must_use]
pub fn format_execution_time(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    if millis < 1000 {
        format!("{millis}ms")
    } else {
        format!("{}s", millis / 1000)
    }
}

/// Collect headers into a sorted map for stable log rendering.
///
/// Repeated header names keep their first value. Values that are not
/// valid UTF-8 are decoded lossily rather than failing the call.
#[must_use]
pub fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut collected = BTreeMap::new();
    for (name, value) in headers {
        collected
            .entry(name.as_str().to_owned())
            .or_insert_with(|| String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    collected
}

/// Parse a raw query string into a sorted parameter map.
///
/// Segments split on `&`, then on `=`; a segment is kept only when it
/// yields exactly two non-empty parts. Anything else (missing value,
/// empty key, repeated `=`) is dropped silently.
#[must_use]
pub fn parse_query_params(query: &str) -> BTreeMap<String, String> {
    query
        .split('&')
        .filter_map(|segment| {
            let parts: Vec<&str> = segment.split('=').collect();
            match parts.as_slice() {
                [key, value] if !key.is_empty() && !value.is_empty() => {
                    Some(((*key).to_owned(), (*value).to_owned()))
                }
                _ => None,
            }
        })
        .collect()
}

/// The input when it contains any non-whitespace character.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|body| !body.trim().is_empty())
}
