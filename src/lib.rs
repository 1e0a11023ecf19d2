//! txnseed — batched synthetic dataset seeder for the transactions/users
//! analytics schema.
//!
//! The seeder produces realistic test data at scale (5,000+ users,
//! 500,000+ transactions) for performance validation of the reporting
//! stack. Generation is seeded and reproducible; persistence is batched
//! so memory stays bounded by one batch regardless of total volume.
//!
//! # Phases
//!
//! A run is two strictly ordered phases. Users are generated and
//! persisted first; the store-assigned identifiers feed the transaction
//! phase, so every transaction references a previously persisted user.
//!
//! ```no_run
//! use txnseed::{SeedConfig, SeedingPipeline, LogProgress};
//! use seed_postgres::PostgresStore;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let store = PostgresStore::connect("host=localhost user=postgres").await?;
//! let config = SeedConfig::default();
//! let mut progress = LogProgress::new(config.log_every_batches);
//! let summary = SeedingPipeline::new(store).run(&config, &mut progress).await?;
//! println!(
//!     "seeded {} users, {} transactions",
//!     summary.users_created, summary.transactions_created
//! );
//! # Ok(())
//! # }
//! ```
//!
//! Re-running against a non-empty store appends more rows; the seeder
//! never deduplicates or reconciles against existing data.

pub mod args;
pub mod config;
pub mod pipeline;
pub mod progress;
pub mod testing;
pub mod writer;

pub use config::SeedConfig;
pub use pipeline::{RunFailure, SeedingPipeline, Summary};
pub use progress::LogProgress;
pub use writer::{BatchSink, BatchWriter, TransactionSink, UserSink};
