//! Seeding run configuration.

use seed_core::SeedError;
use serde::Deserialize;

/// Configuration for one seeding run. Supplied once at pipeline start and
/// never mutated during the run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedConfig {
    /// Users to generate in phase 1.
    pub user_count: u64,
    /// Transactions to generate in phase 2.
    pub transaction_count: u64,
    /// Entities buffered per storage call; also the memory bound.
    pub batch_size: usize,
    /// Seed for the run's random source. Same seed, same generated stream.
    pub seed: u64,
    /// Currency attached to every transaction.
    pub currency: String,
    /// Log a progress line every Nth flush (every flush still reaches the
    /// progress sink).
    pub log_every_batches: u64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            user_count: 5_000,
            transaction_count: 500_000,
            batch_size: 1_000,
            seed: 42,
            currency: "INR".to_string(),
            log_every_batches: 10,
        }
    }
}

impl SeedConfig {
    /// Validate before any generation begins.
    ///
    /// Zero counts are allowed (a zero-user run with transactions still
    /// fails, but in phase 2 where the empty user pool is detected); the
    /// batch size must be positive and no larger than any non-zero count.
    pub fn validate(&self) -> Result<(), SeedError> {
        if self.batch_size == 0 {
            return Err(SeedError::Config("batch_size must be positive".to_string()));
        }
        if self.user_count > 0 && self.batch_size as u64 > self.user_count {
            return Err(SeedError::Config(format!(
                "batch_size {} exceeds user_count {}",
                self.batch_size, self.user_count
            )));
        }
        if self.transaction_count > 0 && self.batch_size as u64 > self.transaction_count {
            return Err(SeedError::Config(format!(
                "batch_size {} exceeds transaction_count {}",
                self.batch_size, self.transaction_count
            )));
        }
        if self.currency.is_empty() {
            return Err(SeedError::Config("currency must not be empty".to_string()));
        }
        if self.log_every_batches == 0 {
            return Err(SeedError::Config(
                "log_every_batches must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SeedConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let config = SeedConfig {
            batch_size: 0,
            ..SeedConfig::default()
        };
        assert!(matches!(config.validate(), Err(SeedError::Config(_))));
    }

    #[test]
    fn batch_size_larger_than_count_is_rejected() {
        let config = SeedConfig {
            user_count: 10,
            batch_size: 100,
            ..SeedConfig::default()
        };
        assert!(matches!(config.validate(), Err(SeedError::Config(_))));
    }

    #[test]
    fn zero_user_count_passes_validation() {
        // The empty-pool failure belongs to phase 2, not validation.
        let config = SeedConfig {
            user_count: 0,
            transaction_count: 1_000,
            batch_size: 50,
            ..SeedConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
