// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies for `/health` and `/qr`. All types derive
//! `ToSchema` so they show up in the OpenAPI document.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;

use crate::error::ApiError;

pub const HEALTH_MESSAGE: &str = "Data received and processed successfully";
pub const URL_UPDATED_MESSAGE: &str = "URL updated successfully";

/// Response for `POST /health`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub message: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            message: HEALTH_MESSAGE.to_string(),
        }
    }
}

/// Body of `POST /qr`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateTargetRequest {
    /// New redirect target
    #[schema(example = "https://example.com")]
    pub url: String,
}

/// Response for a successful `POST /qr`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateTargetResponse {
    pub message: String,
    pub new_url: String,
}

impl UpdateTargetResponse {
    pub fn new(new_url: impl Into<String>) -> Self {
        Self {
            message: URL_UPDATED_MESSAGE.to_string(),
            new_url: new_url.into(),
        }
    }
}

/// Error body shared by every failure response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Rejections for a `POST /qr` body.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetUpdateError {
    #[error("URL is missing")]
    MissingUrl,

    #[error("URL must be a string")]
    UrlNotString,

    #[error("URL is not a valid redirect target")]
    InvalidLocation,
}

impl From<TargetUpdateError> for ApiError {
    fn from(err: TargetUpdateError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

/// Whether `url` can be sent verbatim as a `Location` header.
///
/// `HeaderValue` tolerates obs-text bytes, so non-ASCII is refused here
/// explicitly.
pub fn is_redirect_location(url: &str) -> bool {
    url.is_ascii() && axum::http::HeaderValue::from_str(url).is_ok()
}

impl UpdateTargetRequest {
    /// Parse a raw body without requiring a JSON content type.
    ///
    /// Anything that does not yield a `url` member (empty body, invalid JSON,
    /// a non-object document) counts as a missing URL.
    pub fn from_body(body: &[u8]) -> Result<Self, TargetUpdateError> {
        let document: Value =
            serde_json::from_slice(body).map_err(|_| TargetUpdateError::MissingUrl)?;
        match document.get("url") {
            None => Err(TargetUpdateError::MissingUrl),
            Some(Value::String(url)) => {
                if !is_redirect_location(url) {
                    return Err(TargetUpdateError::InvalidLocation);
                }
                Ok(Self { url: url.clone() })
            }
            Some(_) => Err(TargetUpdateError::UrlNotString),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_url_member() {
        let request = UpdateTargetRequest::from_body(br#"{"url": "http://example.com"}"#).unwrap();
        assert_eq!(request.url, "http://example.com");
    }

    #[test]
    fn extra_members_are_ignored() {
        let request =
            UpdateTargetRequest::from_body(br#"{"url": "/menu", "mode": "x", "n": 1}"#).unwrap();
        assert_eq!(request.url, "/menu");
    }

    #[test]
    fn missing_url_variants() {
        let bodies: [&[u8]; 6] = [b"{}", b"", b"not json", b"[1,2]", b"\"url\"", b"null"];
        for body in bodies {
            assert_eq!(
                UpdateTargetRequest::from_body(body).unwrap_err(),
                TargetUpdateError::MissingUrl,
                "body: {:?}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn non_string_url_is_rejected() {
        assert_eq!(
            UpdateTargetRequest::from_body(br#"{"url": 42}"#).unwrap_err(),
            TargetUpdateError::UrlNotString
        );
        assert_eq!(
            UpdateTargetRequest::from_body(br#"{"url": null}"#).unwrap_err(),
            TargetUpdateError::UrlNotString
        );
    }

    #[test]
    fn header_unsafe_url_is_rejected() {
        assert_eq!(
            UpdateTargetRequest::from_body(br#"{"url": "http://a.test/\r\nSet-Cookie: x=1"}"#)
                .unwrap_err(),
            TargetUpdateError::InvalidLocation
        );
    }

    #[test]
    fn non_ascii_url_is_rejected() {
        let body = r#"{"url": "https://ünï.test/menu"}"#;
        assert_eq!(
            UpdateTargetRequest::from_body(body.as_bytes()).unwrap_err(),
            TargetUpdateError::InvalidLocation
        );
        assert!(!is_redirect_location("https://example.com/caf\u{e9}"));
        assert!(is_redirect_location("https://example.com/caf%C3%A9"));
    }

    #[test]
    fn error_messages_match_wire_bodies() {
        assert_eq!(TargetUpdateError::MissingUrl.to_string(), "URL is missing");
        let api: ApiError = TargetUpdateError::UrlNotString.into();
        assert_eq!(api.status, axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(api.message, "URL must be a string");
    }

    #[test]
    fn update_response_shape() {
        let json = serde_json::to_value(UpdateTargetResponse::new("http://example.com")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "message": "URL updated successfully",
                "new_url": "http://example.com"
            })
        );
    }
}
