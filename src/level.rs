// ABOUTME: Ordered log severities and environment-driven level resolution
// ABOUTME: Maps the active deployment environment to the per-call emit level
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Log level selection.
//!
//! The middleware emits every call log at a single severity resolved from
//! the active deployment environment. The environment name comes from the
//! `ENVIRONMENT` process variable, re-read on every resolution so changes
//! (rare outside tests) take effect immediately; an environment missing
//! from the configured map resolves to [`LogLevel::Info`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fmt;

use crate::config::EnvironmentConfig;
use crate::constants::{DEFAULT_ENVIRONMENT, ENVIRONMENT_VAR};

/// Log severities, ordered least to most severe.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Finest-grained diagnostic detail.
    Trace,
    /// Development-time diagnostics.
    Debug,
    /// Routine operational messages.
    #[default]
    Info,
    /// Conditions worth attention that do not fail the call.
    Warn,
    /// Failures.
    Error,
}

impl LogLevel {
    /// Emit `message` at this severity through the active `tracing`
    /// subscriber.
    ///
    /// The severity switch happens once per message here rather than being
    /// re-decided per log statement.
    pub fn emit(self, message: &str) {
        match self {
            Self::Trace => tracing::trace!("{message}"),
            Self::Debug => tracing::debug!("{message}"),
            Self::Info => tracing::info!("{message}"),
            Self::Warn => tracing::warn!("{message}"),
            Self::Error => tracing::error!("{message}"),
        }
    }

    /// The equivalent `tracing` level, for hosts wiring subscriber filters.
    #[must_use]
    pub const fn as_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }

    /// Uppercase display name, matching the configuration spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of the active deployment environment.
///
/// Reads the `ENVIRONMENT` process variable on every call; absent or
/// blank values fall back to `development`.
#[must_use]
pub fn active_environment() -> String {
    env::var(ENVIRONMENT_VAR)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_owned())
}

/// Resolve the emit severity for the active environment.
///
/// A missing environment entry resolves to [`LogLevel::Info`].
#[must_use]
pub fn resolve_level(environments: &HashMap<String, EnvironmentConfig>) -> LogLevel {
    environments
        .get(&active_environment())
        .map_or(LogLevel::Info, |environment| environment.level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_serde_uses_uppercase_names() {
        let level: LogLevel = serde_yaml::from_str("WARN").unwrap();
        assert_eq!(level, LogLevel::Warn);
        assert_eq!(serde_yaml::to_string(&LogLevel::Trace).unwrap().trim(), "TRACE");
    }

    #[test]
    fn test_display_matches_config_spelling() {
        assert_eq!(LogLevel::Info.to_string(), "INFO");
        assert_eq!(LogLevel::Error.to_string(), "ERROR");
    }

    #[test]
    fn test_tracing_level_equivalents() {
        assert_eq!(LogLevel::Trace.as_tracing_level(), tracing::Level::TRACE);
        assert_eq!(LogLevel::Debug.as_tracing_level(), tracing::Level::DEBUG);
        assert_eq!(LogLevel::Info.as_tracing_level(), tracing::Level::INFO);
        assert_eq!(LogLevel::Warn.as_tracing_level(), tracing::Level::WARN);
        assert_eq!(LogLevel::Error.as_tracing_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_default_level_is_info() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }
}
