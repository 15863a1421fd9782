// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! API key registry and the gate that checks a request against it.

use std::collections::HashMap;

use axum::http::HeaderMap;
use secrecy::{ExposeSecret, SecretString};

use super::AuthError;
use crate::config::ConfigError;

/// Request header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Named API keys known to the service.
///
/// Closed set: every variant must be configured at startup, so a lookup at
/// request time cannot miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyName {
    /// The key guarding `/health` and `POST /qr`
    Main,
}

impl KeyName {
    pub const ALL: [KeyName; 1] = [KeyName::Main];

    /// Environment variable holding the secret for this key.
    pub fn env_var(&self) -> &'static str {
        match self {
            KeyName::Main => "API_KEY",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyName::Main => "main",
        }
    }
}

/// Read-only map from key name to secret.
pub struct ApiKeys {
    secrets: HashMap<KeyName, SecretString>,
}

impl ApiKeys {
    /// Load every [`KeyName`]. A missing or empty variable is fatal.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut secrets = HashMap::with_capacity(KeyName::ALL.len());
        for name in KeyName::ALL {
            let var = name.env_var();
            let secret = lookup(var)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingApiKey { var })?;
            secrets.insert(name, SecretString::from(secret));
        }
        Ok(Self { secrets })
    }

    /// Build a registry holding only the `main` key.
    pub fn single(secret: impl Into<String>) -> Self {
        let mut secrets = HashMap::with_capacity(1);
        secrets.insert(KeyName::Main, SecretString::from(secret.into()));
        Self { secrets }
    }

    fn expected(&self, name: KeyName) -> Option<&str> {
        self.secrets.get(&name).map(|secret| secret.expose_secret())
    }

    /// Compare a provided value with the secret for `name`.
    pub fn verify(&self, name: KeyName, provided: Option<&str>) -> Result<(), AuthError> {
        let provided = provided
            .filter(|value| !value.is_empty())
            .ok_or(AuthError::MissingKey)?;
        match self.expected(name) {
            Some(expected) if expected == provided => Ok(()),
            _ => Err(AuthError::InvalidKey),
        }
    }
}

impl std::fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.secrets.keys().map(KeyName::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ApiKeys").field("names", &names).finish()
    }
}

/// Check the `x-api-key` header of a request against the secret for `name`.
///
/// Logs an error event on every rejection. The event carries whether a value
/// was sent and its length, but not the value itself.
pub fn check_api_key(
    headers: &HeaderMap,
    keys: &ApiKeys,
    name: KeyName,
) -> Result<(), AuthError> {
    let raw = headers.get(API_KEY_HEADER);
    let provided = raw.and_then(|value| value.to_str().ok());

    keys.verify(name, provided).inspect_err(|err| {
        tracing::error!(
            key_name = name.as_str(),
            reason = err.error_code(),
            key_present = raw.is_some(),
            key_len = raw.map(|value| value.len()).unwrap_or(0),
            "Invalid API key received"
        );
    })
}
