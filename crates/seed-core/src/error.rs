//! Error taxonomy for a seeding run.

use thiserror::Error;

/// Errors that can occur during a seeding run.
///
/// `Config` errors are raised before any generation begins and are always
/// fatal. `Generation` errors come from the generators themselves (e.g. the
/// timestamp uniqueness retry budget being exhausted). `Persistence` errors
/// come from the storage boundary during a batch flush; there is no
/// partial-batch retry and no rollback of previously committed batches.
#[derive(Error, Debug)]
pub enum SeedError {
    /// Invalid configuration or distribution (zero batch size, empty or
    /// non-positive weights, empty user pool).
    #[error("configuration error: {0}")]
    Config(String),

    /// Generation failure (e.g. timestamp uniqueness could not be satisfied
    /// within the retry budget).
    #[error("generation error: {0}")]
    Generation(String),

    /// Storage boundary failure during a batch flush.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// The run was cancelled between batches.
    #[error("seeding run cancelled")]
    Cancelled,
}

impl SeedError {
    /// True for errors raised by configuration validation rather than at
    /// generation or persistence time.
    pub fn is_config(&self) -> bool {
        matches!(self, SeedError::Config(_))
    }
}
