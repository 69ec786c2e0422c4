// ABOUTME: Main library entry point for the logmask middleware crate
// ABOUTME: Re-exports the logging pipeline, masking engine, and configuration surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # logmask
//!
//! Masking-aware HTTP request/response logging middleware for axum services.
//! For every inbound call the middleware captures request and response
//! metadata and bodies, redacts sensitive substrings according to
//! configurable regex rules, and emits one log line per direction at a
//! severity chosen by deployment environment. The bytes delivered to the
//! client are never altered.
//!
//! ## Features
//!
//! - **Body capture without double reads**: request and response bodies are
//!   buffered once and replayed, so handlers and clients see the original
//!   byte stream.
//! - **Pattern-cached masking**: an ordered list of regex rules is applied
//!   to every assembled log line, with partial-reveal semantics and a
//!   concurrent compile-once pattern cache.
//! - **Environment-driven severity**: the active deployment environment
//!   selects the emit level per call, defaulting to INFO.
//! - **Per-call correlation**: an inbound `X-Correlation-ID` header is
//!   adopted (or a fresh UUID generated) and scoped to the call.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use logmask::{logging_middleware, LoggingConfig, LoggingState, MaskingRule};
//! use std::sync::Arc;
//!
//! let mut config = LoggingConfig::default();
//! config.mask_patterns.push(MaskingRule::new(r"password=\w+"));
//! config.excluded_paths.push("/health".to_owned());
//!
//! let state = Arc::new(LoggingState::new(config));
//! let app: Router = Router::new()
//!     .route("/", get(|| async { "ok" }))
//!     .layer(middleware::from_fn_with_state(state, logging_middleware));
//! ```

/// Request/response body buffering and replay
pub mod capture;

/// Configuration surface for the middleware
pub mod config;

/// Shared constant values (header names, placeholders, allow-lists)
pub mod constants;

/// Per-call context assembly and log message formatting
pub mod context;

/// Correlation identifier adoption, generation, and span scoping
pub mod correlation;

/// Error types for pattern, configuration, and capture failures
pub mod errors;

/// Ordered log severities and environment-driven level resolution
pub mod level;

/// Sensitive-data masking engine with a concurrent pattern cache
pub mod masking;

/// The axum middleware orchestrating the logging pipeline
pub mod middleware;

pub use config::{AsyncConfig, EnvironmentConfig, InclusionConfig, LoggingConfig};
pub use context::{RequestContext, RequestSnapshot, ResponseSnapshot};
pub use correlation::CorrelationId;
pub use errors::{LogmaskError, Result};
pub use level::LogLevel;
pub use masking::{DataMasker, MaskingRule, PatternCache};
pub use middleware::{logging_middleware, LoggingState};
