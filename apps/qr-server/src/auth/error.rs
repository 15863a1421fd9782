// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::response::{IntoResponse, Response};

use crate::error::ApiError;

/// Body returned for every rejected credential.
pub const AUTH_ERROR_MESSAGE: &str = "API key is missing or incorrect";

/// Why a request failed the API-key gate.
///
/// Both variants produce the same `403` response so clients cannot tell a
/// missing key from a wrong one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// No `x-api-key` header, or an empty one
    MissingKey,
    /// Header present but does not match the configured secret
    InvalidKey,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingKey => "missing_api_key",
            AuthError::InvalidKey => "invalid_api_key",
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingKey => write!(f, "API key header is missing"),
            AuthError::InvalidKey => write!(f, "API key does not match"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<AuthError> for ApiError {
    fn from(_: AuthError) -> Self {
        ApiError::forbidden(AUTH_ERROR_MESSAGE)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
