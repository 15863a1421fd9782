// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Redirect endpoints.
//!
//! `GET /qr` is public and sends clients to the stored target.
//! `POST /qr` replaces the target and sits behind the API-key middleware.

use axum::{
    body::Bytes,
    extract::State,
    http::{header::LOCATION, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::ApiError,
    models::{ErrorResponse, UpdateTargetRequest, UpdateTargetResponse},
    state::AppState,
};

/// Redirect to the current target with `302 Found`.
#[utoipa::path(
    get,
    path = "/qr",
    tag = "QR",
    responses(
        (status = 302, description = "Redirect to the current target",
            headers(("location" = String, description = "Current redirect target")))
    )
)]
pub async fn redirect_to_target(State(state): State<AppState>) -> Result<Response, ApiError> {
    let target = state.target.current().await;
    let location = HeaderValue::from_str(&target.url).map_err(|_| {
        tracing::error!(url = %target.url, "Stored redirect target is not a valid Location header");
        ApiError::internal("Redirect target is invalid")
    })?;
    Ok((StatusCode::FOUND, [(LOCATION, location)]).into_response())
}

/// Replace the redirect target.
#[utoipa::path(
    post,
    path = "/qr",
    tag = "QR",
    request_body = UpdateTargetRequest,
    security(("api_key" = [])),
    responses(
        (status = 200, description = "Target updated", body = UpdateTargetResponse),
        (status = 400, description = "URL is missing or unusable", body = ErrorResponse),
        (status = 403, description = "API key is missing or incorrect", body = ErrorResponse)
    )
)]
pub async fn update_target(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<UpdateTargetResponse>, ApiError> {
    let request = UpdateTargetRequest::from_body(&body).inspect_err(|err| {
        tracing::warn!(reason = %err, "Rejected redirect target update");
    })?;

    let stored = state.target.set_url(request.url).await;
    tracing::info!(new_url = %stored.url, "Redirect target updated");

    Ok(Json(UpdateTargetResponse::new(stored.url)))
}
