// ABOUTME: Axum middleware orchestrating the request/response logging pipeline
// ABOUTME: Gates, captures, masks, emits, and replays without altering traffic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Logging pipeline.
//!
//! Per call the middleware runs a fixed sequence: gate on the master
//! switch and path exclusions, adopt or generate a correlation
//! identifier, buffer and snapshot the request, emit the masked request
//! line, run the handler, snapshot the response, emit the masked
//! response line, and return the response rebuilt around its captured
//! bytes. Handler outcomes pass through unchanged; only the pipeline's
//! own capture failures surface, as HTTP 500 with an error-severity log.
//!
//! The whole sequence executes inside a per-call span carrying the
//! correlation identifier, so the identifier is scoped to the call and
//! released on every exit path.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, warn, Instrument};

use crate::capture::{buffer_request, buffer_response, content_type, extract_body};
use crate::config::LoggingConfig;
use crate::context::{
    collect_headers, parse_query_params, RequestContext, RequestSnapshot, ResponseSnapshot,
};
use crate::correlation::{create_call_span, CorrelationId};
use crate::errors::Result;
use crate::level::resolve_level;
use crate::masking::DataMasker;

/// Shared state for the logging middleware.
///
/// Holds the configuration, the masking engine with its pattern cache,
/// and the excluded-path patterns compiled once at construction.
#[derive(Debug)]
pub struct LoggingState {
    config: LoggingConfig,
    masker: DataMasker,
    excluded_paths: Vec<Regex>,
}

impl LoggingState {
    /// Build middleware state from configuration.
    ///
    /// Excluded-path patterns are compiled here, anchored so an entry
    /// must match the whole path, and matched case-sensitively. A
    /// pattern that fails to compile is skipped with a warning rather
    /// than failing construction.
    #[must_use]
    pub fn new(config: LoggingConfig) -> Self {
        let excluded_paths = compile_excluded_paths(&config.excluded_paths);
        Self {
            config,
            masker: DataMasker::new(),
            excluded_paths,
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &LoggingConfig {
        &self.config
    }

    /// The masking engine backing this state.
    #[must_use]
    pub const fn masker(&self) -> &DataMasker {
        &self.masker
    }

    /// Whether `path` matches any excluded-path pattern.
    #[must_use]
    pub fn is_excluded_path(&self, path: &str) -> bool {
        self.excluded_paths
            .iter()
            .any(|pattern| pattern.is_match(path))
    }
}

/// Compile exclusion patterns, anchoring each to the full path.
fn compile_excluded_paths(patterns: &[String]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| {
            Regex::new(&format!("^(?:{pattern})$")).map_or_else(
                |e| {
                    warn!(pattern = %pattern, error = %e, "Skipping unusable excluded-path pattern");
                    None
                },
                Some,
            )
        })
        .collect()
}

/// Request/response logging middleware.
///
/// Emits one masked log line for the request and one for the response at
/// the severity resolved from the active deployment environment. Calls
/// are skipped entirely (no capture, no masking, no emission) when
/// logging is disabled or the path matches an exclusion.
///
/// # Example
///
/// ```rust,no_run
/// use axum::{middleware, routing::get, Router};
/// use logmask::{logging_middleware, LoggingConfig, LoggingState};
/// use std::sync::Arc;
///
/// let state = Arc::new(LoggingState::new(LoggingConfig::default()));
/// let app: Router = Router::new()
///     .route("/", get(|| async { "ok" }))
///     .layer(middleware::from_fn_with_state(state, logging_middleware));
/// ```
pub async fn logging_middleware(
    State(state): State<Arc<LoggingState>>,
    req: Request,
    next: Next,
) -> Response {
    if !state.config.enabled || state.is_excluded_path(req.uri().path()) {
        return next.run(req).await;
    }

    let correlation_id = CorrelationId::from_headers(req.headers());
    let span = create_call_span(&correlation_id, req.method(), req.uri().path());
    log_call(&state, correlation_id, req, next)
        .instrument(span)
        .await
}

/// Run the logging pipeline for one call.
async fn log_call(
    state: &LoggingState,
    correlation_id: CorrelationId,
    mut req: Request,
    next: Next,
) -> Response {
    req.extensions_mut().insert(correlation_id.clone());

    let started_at = Instant::now();
    let level = resolve_level(&state.config.environments);

    let (req, request_snapshot) = match capture_request(state, &correlation_id, req, started_at).await
    {
        Ok(captured) => captured,
        Err(e) => {
            error!(error = %e, "Failed to buffer request body for logging");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let request_message = request_snapshot.to_log_message(&state.config.inclusion);
    level.emit(&state.masker.mask(&request_message, &state.config.mask_patterns));

    let response = next.run(req).await;
    let ended_at = Instant::now();
    tracing::Span::current().record("status_code", response.status().as_u16());

    let (response, response_snapshot) = match capture_response(state, response, ended_at).await {
        Ok(captured) => captured,
        Err(e) => {
            error!(error = %e, "Failed to buffer response body for logging");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let context = RequestContext::from_snapshots(request_snapshot, response_snapshot);
    let response_message = context.response_message(&state.config.inclusion);
    level.emit(&state.masker.mask(&response_message, &state.config.mask_patterns));

    response
}

/// Buffer the request body when body capture applies and assemble the
/// pre-call snapshot.
async fn capture_request(
    state: &LoggingState,
    correlation_id: &CorrelationId,
    req: Request,
    started_at: Instant,
) -> Result<(Request, RequestSnapshot)> {
    let inclusion = &state.config.inclusion;
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let headers = if inclusion.headers {
        collect_headers(req.headers())
    } else {
        BTreeMap::new()
    };

    let query_params = if inclusion.query_params {
        req.uri()
            .query()
            .map_or_else(BTreeMap::new, parse_query_params)
    } else {
        BTreeMap::new()
    };

    let (req, body) = if inclusion.body {
        let content_type = content_type(req.headers()).map(ToOwned::to_owned);
        let (req, bytes) = buffer_request(req).await?;
        let body = extract_body(&bytes, content_type.as_deref(), inclusion);
        (req, body)
    } else {
        (req, None)
    };

    let snapshot = RequestSnapshot {
        correlation_id: correlation_id.as_str().to_owned(),
        method,
        path,
        headers,
        query_params,
        body,
        started_at,
    };
    Ok((req, snapshot))
}

/// Buffer the response body when body capture applies and assemble the
/// post-call snapshot.
async fn capture_response(
    state: &LoggingState,
    response: Response,
    ended_at: Instant,
) -> Result<(Response, ResponseSnapshot)> {
    let inclusion = &state.config.inclusion;
    let status = response.status();

    let (response, body) = if inclusion.body {
        let content_type = content_type(response.headers()).map(ToOwned::to_owned);
        let (response, bytes) = buffer_response(response).await?;
        let body = extract_body(&bytes, content_type.as_deref(), inclusion);
        (response, body)
    } else {
        (response, None)
    };

    Ok((
        response,
        ResponseSnapshot {
            status,
            body,
            ended_at,
        },
    ))
}
