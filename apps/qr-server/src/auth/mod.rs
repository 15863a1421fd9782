// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Static API-key authentication for mutating endpoints.
//!
//! ## Auth Flow
//!
//! 1. Client sends `x-api-key: <secret>`
//! 2. The `require_api_key` middleware looks up the secret configured for the
//!    route's [`KeyName`] and compares it with the header
//! 3. On a match the request continues to the handler, otherwise the
//!    middleware answers `403` itself and the handler never runs
//!
//! ## Security
//!
//! - Secrets are held as `SecretString` and never appear in `Debug` output
//! - Rejected keys are logged by presence and length only, never by value

pub mod error;
pub mod keys;
pub mod middleware;

pub use error::AuthError;
pub use keys::{check_api_key, ApiKeys, KeyName, API_KEY_HEADER};
pub use middleware::{require_api_key, ApiKeyGuard};
