// ABOUTME: Configuration surface for the request/response logging middleware
// ABOUTME: Serde-backed structs covering exclusions, masking rules, and inclusion toggles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Middleware configuration.
//!
//! All fields carry serde defaults so partial documents deserialize
//! cleanly; `camelCase` key aliases are accepted alongside `snake_case`
//! keys for compatibility with configuration files written for other
//! bindings.
//!
//! ```rust
//! use logmask::LoggingConfig;
//!
//! let config = LoggingConfig::from_yaml_str(r#"
//! excluded_paths:
//!   - "/health"
//! mask_patterns:
//!   - pattern: "password=\\w+"
//!     visible_characters: 0
//! "#).unwrap();
//! assert!(config.enabled);
//! assert_eq!(config.excluded_paths.len(), 1);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::Result;
use crate::level::LogLevel;
use crate::masking::MaskingRule;

/// Top-level configuration for the logging middleware.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Master switch; when false the middleware is a transparent no-op.
    pub enabled: bool,
    /// Anchored regex patterns for paths that are never logged.
    ///
    /// Matching is case-sensitive and must cover the whole path.
    #[serde(alias = "excludedPaths")]
    pub excluded_paths: Vec<String>,
    /// Masking rules applied, in order, to every assembled log message.
    #[serde(alias = "maskPatterns")]
    pub mask_patterns: Vec<MaskingRule>,
    /// Which request/response dimensions are captured and emitted.
    pub inclusion: InclusionConfig,
    /// Host-scheduler hints; carried through configuration but not
    /// interpreted by the pipeline itself.
    #[serde(rename = "async")]
    pub async_config: AsyncConfig,
    /// Minimum emit severity per deployment environment name.
    pub environments: HashMap<String, EnvironmentConfig>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            excluded_paths: Vec::new(),
            mask_patterns: Vec::new(),
            inclusion: InclusionConfig::default(),
            async_config: AsyncConfig::default(),
            environments: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    /// Parse configuration from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::LogmaskError::YamlConfig`] when the
    /// document is not valid YAML or does not match the configuration
    /// shape.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::LogmaskError::JsonConfig`] when the
    /// document is not valid JSON or does not match the configuration
    /// shape.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Toggles controlling which call dimensions are captured and emitted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct InclusionConfig {
    /// Include request headers in the request log line.
    pub headers: bool,
    /// Include parsed query parameters in the request log line.
    #[serde(alias = "queryParams")]
    pub query_params: bool,
    /// Capture and include request/response bodies.
    pub body: bool,
    /// Include the execution-time segment in the response log line.
    pub performance: bool,
}

impl Default for InclusionConfig {
    fn default() -> Self {
        Self {
            headers: true,
            query_params: true,
            body: true,
            performance: true,
        }
    }
}

/// Host-side asynchronous logging hints.
///
/// The pipeline runs inline on the calling task; these values exist so a
/// host scheduler can honor them when offloading emission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AsyncConfig {
    /// Whether the host may emit log lines off the request path.
    pub enabled: bool,
    /// Flush timeout as a human-readable duration string, e.g. `"30s"`.
    pub timeout: String,
}

impl Default for AsyncConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout: "30s".to_owned(),
        }
    }
}

/// Per-environment severity selection.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Minimum severity at which this environment emits call logs.
    pub level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_enable_everything() {
        let config = LoggingConfig::default();
        assert!(config.enabled);
        assert!(config.excluded_paths.is_empty());
        assert!(config.mask_patterns.is_empty());
        assert!(config.inclusion.headers);
        assert!(config.inclusion.query_params);
        assert!(config.inclusion.body);
        assert!(config.inclusion.performance);
        assert!(config.async_config.enabled);
        assert_eq!(config.async_config.timeout, "30s");
        assert!(config.environments.is_empty());
    }

    #[test]
    fn test_empty_yaml_document_yields_defaults() {
        let config = LoggingConfig::from_yaml_str("{}").unwrap();
        assert!(config.enabled);
        assert!(config.inclusion.body);
    }

    #[test]
    fn test_camel_case_aliases_accepted() {
        let config = LoggingConfig::from_yaml_str(
            r##"
excludedPaths:
  - "/actuator/.*"
maskPatterns:
  - pattern: "token=\\w+"
    maskCharacter: "#"
    visibleCharacters: 4
inclusion:
  queryParams: false
"##,
        )
        .unwrap();
        assert_eq!(config.excluded_paths, vec!["/actuator/.*".to_owned()]);
        assert_eq!(config.mask_patterns.len(), 1);
        assert_eq!(config.mask_patterns[0].mask_character, "#");
        assert_eq!(config.mask_patterns[0].visible_characters, 4);
        assert!(!config.inclusion.query_params);
        assert!(config.inclusion.headers);
    }

    #[test]
    fn test_invalid_yaml_is_a_parse_error() {
        let result = LoggingConfig::from_yaml_str("enabled: [not a bool");
        assert!(result.is_err());
    }
}
