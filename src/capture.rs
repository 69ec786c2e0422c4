// ABOUTME: Request/response body buffering for log capture with replay
// ABOUTME: Rebuilds axum bodies around captured bytes so consumers see original streams
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Body capture.
//!
//! HTTP bodies are streams that can only be read once. To log them, the
//! pipeline collects the full body into memory and rebuilds the request
//! or response around the captured bytes: the downstream handler (or the
//! client) then reads exactly the bytes the logger saw. Response bytes
//! are replayed this way exactly once, on the response actually returned
//! to the client.
//!
//! Decoding for log output is deliberately forgiving: non-textual
//! content types and undecodable bytes become placeholder strings, never
//! errors.

use axum::body::{to_bytes, Body};
use axum::extract::Request;
use axum::response::Response;
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::HeaderMap;

use crate::config::InclusionConfig;
use crate::constants::{BODY_DECODE_ERROR_PLACEHOLDER, TEXTUAL_CONTENT_TYPES};
use crate::errors::Result;

/// Buffer the request body and rebuild the request around the captured
/// bytes.
///
/// # Errors
///
/// Returns [`crate::errors::LogmaskError::BodyCapture`] when the body
/// stream cannot be collected.
pub async fn buffer_request(request: Request) -> Result<(Request, Bytes)> {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, usize::MAX).await?;
    let request = Request::from_parts(parts, Body::from(bytes.clone()));
    Ok((request, bytes))
}

/// Buffer the response body and rebuild the response around the captured
/// bytes, replaying them to the client unchanged.
///
/// # Errors
///
/// Returns [`crate::errors::LogmaskError::BodyCapture`] when the body
/// stream cannot be collected.
pub async fn buffer_response(response: Response) -> Result<(Response, Bytes)> {
    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, usize::MAX).await?;
    let response = Response::from_parts(parts, Body::from(bytes.clone()));
    Ok((response, bytes))
}

/// Content type of a request or response, when present and readable.
#[must_use]
pub fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
}

/// Whether `content_type` names a textual payload safe to include in
/// logs.
#[must_use]
pub fn is_textual_content_type(content_type: &str) -> bool {
    TEXTUAL_CONTENT_TYPES
        .iter()
        .any(|allowed| content_type.contains(allowed))
}

/// Decode captured body bytes for log output.
///
/// Returns `None` when body capture is disabled. Non-textual content
/// becomes a placeholder naming the suppressed content type, whether or
/// not any bytes were captured. Textual content decodes to `None` when
/// empty, and to a decode-error placeholder when the bytes are not
/// valid UTF-8.
#[must_use]
pub fn extract_body(
    bytes: &Bytes,
    content_type: Option<&str>,
    inclusion: &InclusionConfig,
) -> Option<String> {
    if !inclusion.body {
        return None;
    }

    if !content_type.is_some_and(is_textual_content_type) {
        return Some(format!(
            "[Body logging disabled for content type: {}]",
            content_type.unwrap_or("unknown")
        ));
    }

    if bytes.is_empty() {
        return None;
    }

    let decoded = std::str::from_utf8(bytes).map_or_else(
        |_| BODY_DECODE_ERROR_PLACEHOLDER.to_owned(),
        ToOwned::to_owned,
    );
    Some(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inclusion() -> InclusionConfig {
        InclusionConfig::default()
    }

    #[test]
    fn test_textual_allow_list_accepts_parameterized_types() {
        assert!(is_textual_content_type("application/json"));
        assert!(is_textual_content_type("application/json; charset=utf-8"));
        assert!(is_textual_content_type("application/xml"));
        assert!(is_textual_content_type("text/plain; charset=us-ascii"));
        assert!(!is_textual_content_type("application/octet-stream"));
        assert!(!is_textual_content_type("image/png"));
    }

    #[test]
    fn test_extract_body_returns_text_for_textual_content() {
        let bytes = Bytes::from_static(b"{\"user\":\"amy\"}");
        let body = extract_body(&bytes, Some("application/json"), &inclusion());
        assert_eq!(body.as_deref(), Some("{\"user\":\"amy\"}"));
    }

    #[test]
    fn test_extract_body_disabled_by_inclusion_flag() {
        let bytes = Bytes::from_static(b"data");
        let off = InclusionConfig {
            body: false,
            ..inclusion()
        };
        assert_eq!(extract_body(&bytes, Some("text/plain"), &off), None);
    }

    #[test]
    fn test_extract_body_empty_textual_body_yields_nothing() {
        let bytes = Bytes::new();
        assert_eq!(extract_body(&bytes, Some("application/json"), &inclusion()), None);
    }

    #[test]
    fn test_extract_body_empty_non_textual_still_names_the_content_type() {
        let bytes = Bytes::new();
        let body = extract_body(&bytes, Some("application/octet-stream"), &inclusion());
        assert_eq!(
            body.as_deref(),
            Some("[Body logging disabled for content type: application/octet-stream]")
        );
    }

    #[test]
    fn test_extract_body_non_textual_names_the_content_type() {
        let bytes = Bytes::from_static(&[0u8, 1, 2]);
        let body = extract_body(&bytes, Some("application/octet-stream"), &inclusion());
        assert_eq!(
            body.as_deref(),
            Some("[Body logging disabled for content type: application/octet-stream]")
        );
    }

    #[test]
    fn test_extract_body_missing_content_type_is_non_textual() {
        let bytes = Bytes::from_static(b"raw");
        let body = extract_body(&bytes, None, &inclusion());
        assert_eq!(
            body.as_deref(),
            Some("[Body logging disabled for content type: unknown]")
        );
    }

    #[test]
    fn test_extract_body_invalid_utf8_yields_placeholder() {
        let bytes = Bytes::from_static(&[0xff, 0xfe, 0x00]);
        let body = extract_body(&bytes, Some("text/plain"), &inclusion());
        assert_eq!(body.as_deref(), Some(BODY_DECODE_ERROR_PLACEHOLDER));
    }

    #[tokio::test]
    async fn test_buffer_request_preserves_bytes_for_downstream() {
        let request = Request::builder()
            .method("POST")
            .uri("/echo")
            .body(Body::from("hello body"))
            .unwrap();

        let (request, bytes) = buffer_request(request).await.unwrap();
        assert_eq!(bytes.as_ref(), b"hello body");

        let replayed = to_bytes(request.into_body(), usize::MAX).await.unwrap();
        assert_eq!(replayed, bytes);
    }

    #[tokio::test]
    async fn test_buffer_response_replays_identical_bytes() {
        let response = Response::builder()
            .status(200)
            .body(Body::from("payload"))
            .unwrap();

        let (response, bytes) = buffer_response(response).await.unwrap();
        assert_eq!(bytes.as_ref(), b"payload");

        let replayed = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(replayed, bytes);
    }
}
