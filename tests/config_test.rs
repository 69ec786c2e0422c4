// ABOUTME: Tests for configuration parsing and defaults
// ABOUTME: Validates YAML/JSON loading, key aliases, and partial documents
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use anyhow::Result;
use logmask::{LogLevel, LoggingConfig};

const FULL_YAML: &str = r##"
enabled: true
excluded_paths:
  - "/health"
  - "/metrics/.*"
mask_patterns:
  - pattern: "password=\\w+"
    mask_character: "*"
    visible_characters: 0
  - pattern: "card=\\d+"
    mask_character: "#"
    visible_characters: 4
inclusion:
  headers: true
  query_params: false
  body: true
  performance: true
async:
  enabled: false
  timeout: "10s"
environments:
  development:
    level: DEBUG
  production:
    level: WARN
"##;

#[test]
fn test_full_yaml_document_parses() -> Result<()> {
    let config = LoggingConfig::from_yaml_str(FULL_YAML)?;

    assert!(config.enabled);
    assert_eq!(config.excluded_paths, vec!["/health", "/metrics/.*"]);

    assert_eq!(config.mask_patterns.len(), 2);
    assert_eq!(config.mask_patterns[0].pattern, r"password=\w+");
    assert_eq!(config.mask_patterns[0].visible_characters, 0);
    assert_eq!(config.mask_patterns[1].mask_character, "#");
    assert_eq!(config.mask_patterns[1].visible_characters, 4);

    assert!(config.inclusion.headers);
    assert!(!config.inclusion.query_params);

    assert!(!config.async_config.enabled);
    assert_eq!(config.async_config.timeout, "10s");

    assert_eq!(
        config.environments.get("development").unwrap().level,
        LogLevel::Debug
    );
    assert_eq!(
        config.environments.get("production").unwrap().level,
        LogLevel::Warn
    );
    Ok(())
}

#[test]
fn test_partial_document_fills_defaults() -> Result<()> {
    let config = LoggingConfig::from_yaml_str("enabled: false")?;
    assert!(!config.enabled);
    assert!(config.excluded_paths.is_empty());
    assert!(config.inclusion.headers);
    assert!(config.inclusion.body);
    assert_eq!(config.async_config.timeout, "30s");
    Ok(())
}

#[test]
fn test_json_document_parses() -> Result<()> {
    let config = LoggingConfig::from_json_str(
        r#"{
            "excluded_paths": ["/ping"],
            "environments": {"prod": {"level": "ERROR"}}
        }"#,
    )?;
    assert_eq!(config.excluded_paths, vec!["/ping"]);
    assert_eq!(config.environments.get("prod").unwrap().level, LogLevel::Error);
    Ok(())
}

#[test]
fn test_camel_case_document_parses() -> Result<()> {
    let config = LoggingConfig::from_yaml_str(
        r#"
excludedPaths:
  - "/actuator/.*"
maskPatterns:
  - pattern: "token=\\w+"
    maskCharacter: "X"
    visibleCharacters: 6
inclusion:
  queryParams: false
"#,
    )?;
    assert_eq!(config.excluded_paths, vec!["/actuator/.*"]);
    assert_eq!(config.mask_patterns[0].mask_character, "X");
    assert_eq!(config.mask_patterns[0].visible_characters, 6);
    assert!(!config.inclusion.query_params);
    Ok(())
}

#[test]
fn test_unknown_level_is_rejected() {
    let result = LoggingConfig::from_yaml_str(
        r#"
environments:
  prod:
    level: LOUD
"#,
    );
    assert!(result.is_err());
}

#[test]
fn test_malformed_yaml_is_rejected() {
    assert!(LoggingConfig::from_yaml_str("enabled: [oops").is_err());
}

#[test]
fn test_config_round_trips_through_yaml() -> Result<()> {
    let config = LoggingConfig::from_yaml_str(FULL_YAML)?;
    let rendered = serde_yaml::to_string(&config)?;
    let reparsed = LoggingConfig::from_yaml_str(&rendered)?;

    assert_eq!(reparsed.excluded_paths, config.excluded_paths);
    assert_eq!(reparsed.mask_patterns.len(), config.mask_patterns.len());
    assert_eq!(reparsed.async_config.timeout, config.async_config.timeout);
    assert_eq!(
        reparsed.environments.get("production").unwrap().level,
        LogLevel::Warn
    );
    Ok(())
}
