//! Shared domain model for the txnseed synthetic dataset seeder.
//!
//! This crate holds the types that cross crate boundaries: the generated
//! user/transaction records, the activity-tier and payment vocabularies,
//! the `SeedStore` storage boundary, progress reporting types, and the
//! run-level error taxonomy. The generation logic itself lives in
//! `seed-generator`; storage implementations live in their own crates
//! (e.g. `seed-postgres`).

pub mod error;
pub mod model;
pub mod progress;
pub mod store;

pub use error::SeedError;
pub use model::{
    ActivityTier, FailureReason, NewTransaction, NewUser, PaymentMethod, PersistedUser,
    TransactionStatus, TransactionType, UserId,
};
pub use progress::{Phase, ProgressEvent, ProgressSink};
pub use store::SeedStore;
