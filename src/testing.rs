//! In-memory test doubles for the storage boundary and progress sink.
//!
//! Used by the integration tests under `tests/` and the unit tests in
//! this crate; not intended for production use.

use async_trait::async_trait;
use seed_core::{
    NewTransaction, NewUser, ProgressEvent, ProgressSink, SeedError, SeedStore, UserId,
};
use std::sync::Mutex;

#[derive(Default)]
struct MemoryInner {
    users: Vec<NewUser>,
    transactions: Vec<NewTransaction>,
    user_batch_sizes: Vec<usize>,
    transaction_batch_sizes: Vec<usize>,
    batches_accepted: u64,
}

/// In-memory `SeedStore` that assigns sequential identifiers and records
/// every batch size it sees, so tests can assert the memory-bound and
/// flush-cadence properties. Optionally injects a persistence failure
/// after a configured number of accepted batches.
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
    fail_after_batches: Option<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MemoryInner::default()),
            fail_after_batches: None,
        }
    }

    /// Accept `batches` flushes (across both phases), then fail every
    /// subsequent one with a persistence error.
    pub fn failing_after(batches: u64) -> Self {
        Self {
            inner: Mutex::new(MemoryInner::default()),
            fail_after_batches: Some(batches),
        }
    }

    pub fn user_count(&self) -> u64 {
        self.lock().users.len() as u64
    }

    pub fn transaction_count(&self) -> u64 {
        self.lock().transactions.len() as u64
    }

    pub fn users(&self) -> Vec<NewUser> {
        self.lock().users.clone()
    }

    pub fn transactions(&self) -> Vec<NewTransaction> {
        self.lock().transactions.clone()
    }

    pub fn user_batch_sizes(&self) -> Vec<usize> {
        self.lock().user_batch_sizes.clone()
    }

    pub fn transaction_batch_sizes(&self) -> Vec<usize> {
        self.lock().transaction_batch_sizes.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        self.inner.lock().expect("memory store poisoned")
    }

    fn check_injected_failure(&self, inner: &MemoryInner) -> Result<(), SeedError> {
        if let Some(limit) = self.fail_after_batches {
            if inner.batches_accepted >= limit {
                return Err(SeedError::Persistence(
                    "injected storage failure".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SeedStore for MemoryStore {
    async fn insert_users(&self, batch: &[NewUser]) -> Result<Vec<UserId>, SeedError> {
        let mut inner = self.lock();
        self.check_injected_failure(&inner)?;

        let first_id = inner.users.len() as i64 + 1;
        inner.users.extend_from_slice(batch);
        inner.user_batch_sizes.push(batch.len());
        inner.batches_accepted += 1;

        Ok((first_id..first_id + batch.len() as i64).collect())
    }

    async fn insert_transactions(&self, batch: &[NewTransaction]) -> Result<u64, SeedError> {
        let mut inner = self.lock();
        self.check_injected_failure(&inner)?;

        inner.transactions.extend_from_slice(batch);
        inner.transaction_batch_sizes.push(batch.len());
        inner.batches_accepted += 1;

        Ok(batch.len() as u64)
    }
}

/// Progress sink that records every event for later assertions.
#[derive(Default)]
pub struct CollectingProgress {
    pub events: Vec<ProgressEvent>,
}

impl ProgressSink for CollectingProgress {
    fn on_flush(&mut self, event: &ProgressEvent) {
        self.events.push(event.clone());
    }
}
