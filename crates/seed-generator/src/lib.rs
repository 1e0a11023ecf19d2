//! Seeded generators for the txnseed synthetic dataset.
//!
//! Everything in this crate is pure generation: no storage access, no
//! global state. The caller constructs the factories, owns the RNG
//! (`StdRng::seed_from_u64` for reproducible runs), and threads it by
//! `&mut` into every call, so two runs with the same seed produce the
//! same stream of records.
//!
//! ```text
//! ActivityProfileAssigner ──► UserFactory ──► NewUser*
//!
//! WeightedSampler ─┐
//! TimestampAllocator ─► TransactionFactory ──► NewTransaction*
//!        (user pool) ─┘
//! ```
//!
//! The only session-scoped mutable state is the `TimestampAllocator`'s
//! seen-set (global timestamp uniqueness) and the `UserFactory`'s email
//! seen-set, each owned by exactly one factory instance.

pub mod profile;
pub mod sampler;
pub mod timestamp;
pub mod transaction;
pub mod user;

pub use profile::ActivityProfileAssigner;
pub use sampler::WeightedSampler;
pub use timestamp::TimestampAllocator;
pub use transaction::{TransactionFactory, TransactionIter};
pub use user::{UserFactory, UserIter};
