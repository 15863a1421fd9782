// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{ApiKeyGuard, ApiKeys, KeyName};
use crate::config::{AppConfig, DEFAULT_TARGET_URL};
use crate::store::RedirectStore;

#[derive(Clone)]
pub struct AppState {
    pub keys: Arc<ApiKeys>,
    pub target: RedirectStore,
}

impl AppState {
    pub fn new(keys: ApiKeys, default_target_url: impl Into<String>) -> Self {
        Self {
            keys: Arc::new(keys),
            target: RedirectStore::new(default_target_url),
        }
    }

    pub fn from_config(config: AppConfig) -> Self {
        Self::new(config.keys, config.default_target_url)
    }

    /// Middleware state for routes protected by `key_name`.
    pub fn guard(&self, key_name: KeyName) -> ApiKeyGuard {
        ApiKeyGuard::new(self.keys.clone(), key_name)
    }

    /// State with a single `main` key and the stock default target.
    pub fn with_key(secret: impl Into<String>) -> Self {
        Self::new(ApiKeys::single(secret), DEFAULT_TARGET_URL)
    }
}
