// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! API-key middleware for Axum.
//!
//! Wraps a route so the handler only runs once the request passes
//! [`check_api_key`]. Otherwise the middleware answers `403` on its own.
//!
//! ```rust,ignore
//! let guard = ApiKeyGuard::new(state.keys.clone(), KeyName::Main);
//!
//! let app = Router::new().route(
//!     "/protected",
//!     post(handler).route_layer(axum::middleware::from_fn_with_state(
//!         guard,
//!         require_api_key,
//!     )),
//! );
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{check_api_key, ApiKeys, KeyName};

/// Middleware state: which key a route requires and where to find it.
#[derive(Clone)]
pub struct ApiKeyGuard {
    pub keys: Arc<ApiKeys>,
    pub key_name: KeyName,
}

impl ApiKeyGuard {
    pub fn new(keys: Arc<ApiKeys>, key_name: KeyName) -> Self {
        Self { keys, key_name }
    }
}

/// Authentication middleware function.
pub async fn require_api_key(
    State(guard): State<ApiKeyGuard>,
    request: Request,
    next: Next,
) -> Response {
    match check_api_key(request.headers(), &guard.keys, guard.key_name) {
        Ok(()) => next.run(request).await,
        Err(e) => e.into_response(),
    }
}
