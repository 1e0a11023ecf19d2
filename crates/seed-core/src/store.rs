//! Storage boundary for persisting generated batches.

use crate::error::SeedError;
use crate::model::{NewTransaction, NewUser, UserId};
use async_trait::async_trait;

/// The storage boundary the seeder writes through.
///
/// Each method is expected to be a single bulk operation per batch with
/// per-batch atomicity; the seeder does not require cross-batch atomicity
/// and never reads back existing data beyond the identifiers returned by
/// `insert_users`.
#[async_trait]
pub trait SeedStore: Send + Sync {
    /// Persist a batch of users, returning the store-assigned identifiers
    /// in batch order.
    async fn insert_users(&self, batch: &[NewUser]) -> Result<Vec<UserId>, SeedError>;

    /// Persist a batch of transactions, returning the number of rows
    /// written.
    async fn insert_transactions(&self, batch: &[NewTransaction]) -> Result<u64, SeedError>;
}
