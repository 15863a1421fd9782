// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{body::Bytes, Json};

use crate::models::{ErrorResponse, HealthResponse};

/// Authenticated health check.
///
/// Any body is accepted, including none at all. It is parsed as JSON only to
/// note in the debug log whether it was valid, then discarded.
#[utoipa::path(
    post,
    path = "/health",
    tag = "Health",
    request_body(
        content = String,
        content_type = "application/json",
        description = "Any JSON document, or nothing. Ignored."
    ),
    security(("api_key" = [])),
    responses(
        (status = 200, description = "Request received", body = HealthResponse),
        (status = 403, description = "API key is missing or incorrect", body = ErrorResponse)
    )
)]
pub async fn health(body: Bytes) -> Json<HealthResponse> {
    let parsed = serde_json::from_slice::<serde_json::Value>(&body).is_ok();
    tracing::debug!(body_len = body.len(), json = parsed, "Health check received");
    Json(HealthResponse::default())
}
