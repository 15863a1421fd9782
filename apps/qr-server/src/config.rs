// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Environment variable names, defaults and the startup loader. Configuration
//! is read once from the environment and never changes afterwards.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `API_HOST` | Server bind address | `0.0.0.0` |
//! | `API_PORT` | Server bind port | `5000` |
//! | `API_DEBUG` | Verbose logging (`1`, `true`, `yes`, `on`) | `false` |
//! | `API_KEY` | Secret for the `main` API key | Required |
//! | `API_QR_DEFAULT` | Initial redirect target for `GET /qr` | `https://google.com` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=info` |
//!
//! Every loader has a `from_lookup` form taking a `Fn(&str) -> Option<String>`
//! so tests can supply variables without touching the process environment.

use thiserror::Error;

use crate::auth::ApiKeys;
use crate::models::is_redirect_location;

/// Environment variable name for the bind host.
pub const HOST_ENV: &str = "API_HOST";

/// Environment variable name for the bind port.
pub const PORT_ENV: &str = "API_PORT";

/// Environment variable name for the debug switch.
pub const DEBUG_ENV: &str = "API_DEBUG";

/// Environment variable name for the initial redirect target.
pub const DEFAULT_URL_ENV: &str = "API_QR_DEFAULT";

/// Environment variable name for the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_TARGET_URL: &str = "https://google.com";

/// Upper bound on request bodies (64 * 1000 * 100 bytes).
pub const MAX_BODY_BYTES: usize = 64 * 1000 * 100;

/// Fatal startup configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API key not set: environment variable {var} is missing or empty")]
    MissingApiKey { var: &'static str },

    #[error("invalid port in {var}: {value:?} is not an integer between 1 and 65535")]
    InvalidPort { var: &'static str, value: String },

    #[error("invalid default redirect URL in {var}: {value:?}")]
    InvalidDefaultUrl { var: &'static str, value: String },
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Bind and logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub log_format: LogFormat,
}

impl ServerConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = non_empty(&lookup, HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match non_empty(&lookup, PORT_ENV) {
            Some(value) => parse_port(&value).ok_or(ConfigError::InvalidPort {
                var: PORT_ENV,
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let debug = non_empty(&lookup, DEBUG_ENV)
            .map(|value| parse_flag(&value))
            .unwrap_or(false);

        let log_format = non_empty(&lookup, LOG_FORMAT_ENV)
            .map(|value| LogFormat::parse(&value))
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            debug,
            log_format,
        })
    }

    /// `host:port` string for binding the listener.
    pub fn bind_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// Initial redirect target, validated as a usable `Location` header value.
pub fn default_target_url(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
    let url = non_empty(&lookup, DEFAULT_URL_ENV).unwrap_or_else(|| DEFAULT_TARGET_URL.to_string());
    if !is_redirect_location(&url) {
        return Err(ConfigError::InvalidDefaultUrl {
            var: DEFAULT_URL_ENV,
            value: url,
        });
    }
    Ok(url)
}

/// Everything the server needs at startup.
#[derive(Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub keys: ApiKeys,
    pub default_target_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_lookup(&lookup)?,
            keys: ApiKeys::from_lookup(&lookup)?,
            default_target_url: default_target_url(&lookup)?,
        })
    }
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Reads a variable, treating blank values as unset.
fn non_empty(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_port(value: &str) -> Option<u16> {
    value.parse::<u16>().ok().filter(|port| *port > 0)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
