// SPDX-FileCopyrightText: 2026 Helpdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory history store with failure injection and access counters.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use helpdesk_core::HelpdeskError;
use helpdesk_core::traits::{HistoryStore, PluginAdapter};
use helpdesk_core::types::{AdapterType, Exchange, HealthStatus, NewExchange};

/// A `HistoryStore` backed by a `Vec`, for handler tests.
///
/// Reads and writes are counted so tests can assert that a path touched
/// storage (or did not).
#[derive(Default)]
pub struct MockHistory {
    rows: Arc<Mutex<Vec<Exchange>>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MockHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `recent()` fail from now on.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make `append()` fail from now on.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of `recent()` calls, including failed ones.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `append()` calls, including failed ones.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Every stored exchange in insertion order.
    pub async fn exchanges(&self) -> Vec<Exchange> {
        self.rows.lock().await.clone()
    }

    fn injected_failure(flag: &AtomicBool, op: &str) -> Result<(), HelpdeskError> {
        if flag.load(Ordering::SeqCst) {
            return Err(HelpdeskError::Storage {
                source: format!("mock {op} failure").into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PluginAdapter for MockHistory {
    fn name(&self) -> &str {
        "mock-history"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, HelpdeskError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HelpdeskError> {
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for MockHistory {
    async fn initialize(&self) -> Result<(), HelpdeskError> {
        Ok(())
    }

    async fn append(&self, exchange: &NewExchange) -> Result<(), HelpdeskError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Self::injected_failure(&self.fail_writes, "write")?;

        let mut rows = self.rows.lock().await;
        let id = rows.len() as i64 + 1;
        rows.push(Exchange {
            id,
            user_id: exchange.user_id,
            username: exchange.username.clone(),
            message: exchange.message.clone(),
            response: exchange.response.clone(),
            timestamp: format!("2026-01-01T00:00:00.{id:03}Z"),
        });
        Ok(())
    }

    async fn recent(&self, user_id: i64, limit: usize) -> Result<Vec<Exchange>, HelpdeskError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Self::injected_failure(&self.fail_reads, "read")?;

        Ok(self
            .rows
            .lock()
            .await
            .iter()
            .rev()
            .filter(|e| e.user_id == user_id)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn close(&self) -> Result<(), HelpdeskError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn recent_is_newest_first_and_per_user() {
        let history = MockHistory::new();
        history.append(&NewExchange::new(1, None, "a", "1")).await.unwrap();
        history.append(&NewExchange::new(2, None, "x", "9")).await.unwrap();
        history.append(&NewExchange::new(1, None, "b", "2")).await.unwrap();

        let rows = history.recent(1, 20).await.unwrap();
        let messages: Vec<&str> = rows.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["b", "a"]);
        assert_eq!(history.read_count(), 1);
        assert_eq!(history.write_count(), 3);
    }

    #[tokio::test]
    async fn injected_failures_are_storage_errors() {
        let history = MockHistory::new();
        history.set_fail_reads(true);
        history.set_fail_writes(true);

        assert!(history.recent(1, 20).await.unwrap_err().is_storage());
        assert!(
            history
                .append(&NewExchange::new(1, None, "a", "b"))
                .await
                .unwrap_err()
                .is_storage()
        );
        assert!(history.exchanges().await.is_empty());
    }
}
