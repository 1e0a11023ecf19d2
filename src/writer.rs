//! Batched persistence with a hard memory bound.

use async_trait::async_trait;
use seed_core::{
    NewTransaction, NewUser, PersistedUser, Phase, ProgressEvent, ProgressSink, SeedError,
    SeedStore,
};
use std::time::Instant;

/// One phase's persistence target. Adapts the two `SeedStore` insert
/// methods to a common shape the writer can drive.
#[async_trait]
pub trait BatchSink: Send {
    type Item: Send + Sync;

    async fn persist(&mut self, batch: &[Self::Item]) -> Result<(), SeedError>;
}

/// Persists user batches and captures the store-assigned identifiers,
/// paired with tiers, for the transaction phase.
pub struct UserSink<'a, S> {
    store: &'a S,
    pool: Vec<PersistedUser>,
}

impl<'a, S> UserSink<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            pool: Vec::new(),
        }
    }

    /// The persisted users accumulated so far.
    pub fn into_pool(self) -> Vec<PersistedUser> {
        self.pool
    }
}

#[async_trait]
impl<S: SeedStore> BatchSink for UserSink<'_, S> {
    type Item = NewUser;

    async fn persist(&mut self, batch: &[NewUser]) -> Result<(), SeedError> {
        let ids = self.store.insert_users(batch).await?;
        if ids.len() != batch.len() {
            return Err(SeedError::Persistence(format!(
                "store returned {} identifiers for a batch of {}",
                ids.len(),
                batch.len()
            )));
        }
        self.pool.extend(
            ids.into_iter()
                .zip(batch)
                .map(|(id, user)| PersistedUser { id, tier: user.tier }),
        );
        Ok(())
    }
}

/// Persists transaction batches.
pub struct TransactionSink<'a, S> {
    store: &'a S,
}

impl<'a, S> TransactionSink<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: SeedStore> BatchSink for TransactionSink<'_, S> {
    type Item = NewTransaction;

    async fn persist(&mut self, batch: &[NewTransaction]) -> Result<(), SeedError> {
        let inserted = self.store.insert_transactions(batch).await?;
        if inserted != batch.len() as u64 {
            return Err(SeedError::Persistence(format!(
                "store wrote {inserted} rows for a batch of {}",
                batch.len()
            )));
        }
        Ok(())
    }
}

/// Buffers generated records up to the batch size, persists them in one
/// bulk call, and clears the buffer.
///
/// The buffer never holds more than one batch's worth of entities, which
/// is what keeps 500,000-row runs memory-bounded. One progress event is
/// emitted per flush. Persistence failures propagate as fatal; there is
/// no partial-batch retry.
pub struct BatchWriter<K: BatchSink> {
    sink: K,
    buf: Vec<K::Item>,
    batch_size: usize,
    phase: Phase,
    total: u64,
    written: u64,
    flushes: u64,
    started: Instant,
}

impl<K: BatchSink> BatchWriter<K> {
    pub fn new(sink: K, batch_size: usize, total: u64, phase: Phase) -> Self {
        Self {
            sink,
            buf: Vec::with_capacity(batch_size),
            batch_size,
            phase,
            total,
            written: 0,
            flushes: 0,
            started: Instant::now(),
        }
    }

    /// Buffer one record, flushing if the buffer reaches the batch size.
    pub async fn write(
        &mut self,
        item: K::Item,
        progress: &mut (dyn ProgressSink + Send),
    ) -> Result<(), SeedError> {
        self.buf.push(item);
        if self.buf.len() >= self.batch_size {
            self.flush(progress).await?;
        }
        Ok(())
    }

    /// Force persistence of a partial trailing buffer. No-op when empty.
    pub async fn flush(
        &mut self,
        progress: &mut (dyn ProgressSink + Send),
    ) -> Result<(), SeedError> {
        if self.buf.is_empty() {
            return Ok(());
        }

        self.sink.persist(&self.buf).await?;
        self.written += self.buf.len() as u64;
        self.flushes += 1;
        self.buf.clear();

        progress.on_flush(&ProgressEvent {
            phase: self.phase,
            completed: self.written,
            total: self.total,
            elapsed: self.started.elapsed(),
        });
        Ok(())
    }

    /// Records persisted so far (excludes anything still buffered).
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn flushes(&self) -> u64 {
        self.flushes
    }

    /// True exactly at batch boundaries, where cancellation may be
    /// observed without discarding buffered work.
    pub fn is_drained(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_sink(self) -> K {
        self.sink
    }
}
