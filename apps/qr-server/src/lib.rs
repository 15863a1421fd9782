// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! QR Redirect Server
//!
//! A small Axum service. `GET /qr` redirects to a stored target URL, and
//! callers holding the API key can replace that URL with `POST /qr`.
//! `POST /health` is an authenticated echo used for liveness checks.
//!
//! ## Modules
//!
//! - `api` - HTTP router and handlers (Axum)
//! - `auth` - Static API-key gate and middleware
//! - `config` - Environment configuration
//! - `store` - In-memory redirect target

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
pub mod telemetry;
