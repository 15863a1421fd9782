// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory redirect target.
//!
//! One record per process. It starts at the configured default URL and is
//! replaced wholesale by each accepted update. Nothing is persisted.

use std::sync::Arc;

use tokio::sync::RwLock;

/// Where `GET /qr` currently sends clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    pub url: String,
    /// Carried with the target but not used when redirecting.
    pub mode: Option<String>,
}

impl RedirectTarget {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            mode: None,
        }
    }
}

/// Shared handle to the redirect target.
///
/// Reads and writes go through one lock, so a reader never sees a half
/// written record and concurrent writers resolve last-writer-wins.
#[derive(Clone, Debug)]
pub struct RedirectStore {
    target: Arc<RwLock<RedirectTarget>>,
}

impl RedirectStore {
    pub fn new(initial_url: impl Into<String>) -> Self {
        Self {
            target: Arc::new(RwLock::new(RedirectTarget::new(initial_url))),
        }
    }

    /// Snapshot of the current target.
    pub async fn current(&self) -> RedirectTarget {
        self.target.read().await.clone()
    }

    /// Replace the URL, keeping `mode`. Returns the record as stored.
    pub async fn set_url(&self, url: impl Into<String>) -> RedirectTarget {
        let mut target = self.target.write().await;
        target.url = url.into();
        target.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_at_initial_url() {
        let store = RedirectStore::new("https://google.com");
        assert_eq!(store.current().await, RedirectTarget::new("https://google.com"));
    }

    #[tokio::test]
    async fn set_url_replaces_url_and_keeps_mode() {
        let store = RedirectStore::new("https://google.com");
        store.target.write().await.mode = Some("menu".to_string());

        let stored = store.set_url("https://example.com").await;
        assert_eq!(stored.url, "https://example.com");
        assert_eq!(stored.mode.as_deref(), Some("menu"));
        assert_eq!(store.current().await, stored);
    }

    #[tokio::test]
    async fn clones_share_the_same_record() {
        let store = RedirectStore::new("https://google.com");
        let other = store.clone();
        other.set_url("https://example.com").await;
        assert_eq!(store.current().await.url, "https://example.com");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_writers_leave_one_complete_value() {
        let store = RedirectStore::new("https://google.com");
        let candidates: Vec<String> = (0..32).map(|i| format!("https://example.com/{i}")).collect();

        let handles: Vec<_> = candidates
            .iter()
            .cloned()
            .map(|url| {
                let store = store.clone();
                tokio::spawn(async move { store.set_url(url).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let final_url = store.current().await.url;
        assert!(candidates.contains(&final_url));
    }
}
