//! Two-phase seeding orchestration.

use crate::config::SeedConfig;
use crate::writer::{BatchWriter, TransactionSink, UserSink};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use seed_core::{Phase, ProgressSink, SeedError, SeedStore};
use seed_generator::{TransactionFactory, UserFactory};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Terminal result of a successful run.
#[derive(Debug, Clone, Default)]
pub struct Summary {
    pub users_created: u64,
    pub transactions_created: u64,
    pub user_phase: Duration,
    pub transaction_phase: Duration,
    pub elapsed: Duration,
}

impl Summary {
    pub fn rows_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            (self.users_created + self.transactions_created) as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// A failed run: the terminal error plus an accurate partial summary, so
/// operators know how many rows were committed before the abort and can
/// decide whether to truncate and rerun. Already-persisted batches are
/// never rolled back.
#[derive(Debug, Error)]
#[error(
    "{error}; persisted {} users and {} transactions before aborting",
    partial.users_created,
    partial.transactions_created
)]
pub struct RunFailure {
    #[source]
    pub error: SeedError,
    pub partial: Summary,
}

/// Orchestrates the two ordered phases: users, then transactions.
///
/// Phase 1 fully completes (including its trailing flush) before phase 2
/// begins, because the transaction factory requires resolved user
/// identifiers. The run is not idempotent: re-running against a non-empty
/// store appends rows.
pub struct SeedingPipeline<S> {
    store: S,
    cancel: CancellationToken,
    reference_now: Option<DateTime<Utc>>,
}

impl<S: SeedStore> SeedingPipeline<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            cancel: CancellationToken::new(),
            reference_now: None,
        }
    }

    /// Install a cooperative cancellation signal. It is observed only at
    /// batch boundaries; an in-flight flush always completes.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Pin the run's reference "now" (all creation windows end at it).
    /// Defaults to the wall clock at run start; pinning it makes a seeded
    /// run fully reproducible, timestamps included.
    pub fn with_reference_time(mut self, now: DateTime<Utc>) -> Self {
        self.reference_now = Some(now);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Execute a full seeding run.
    pub async fn run(
        &self,
        config: &SeedConfig,
        progress: &mut (dyn ProgressSink + Send),
    ) -> Result<Summary, RunFailure> {
        if let Err(error) = config.validate() {
            return Err(RunFailure {
                error,
                partial: Summary::default(),
            });
        }

        let run_started = Instant::now();
        let now = self.reference_now.unwrap_or_else(Utc::now);
        let mut rng = StdRng::seed_from_u64(config.seed);

        info!(
            "Seeding {} users and {} transactions (batch size {}, seed {})",
            config.user_count, config.transaction_count, config.batch_size, config.seed
        );

        let fail = |error: SeedError,
                    users_created: u64,
                    user_phase: Duration,
                    transactions_created: u64,
                    transaction_phase: Duration| RunFailure {
            error,
            partial: Summary {
                users_created,
                transactions_created,
                user_phase,
                transaction_phase,
                elapsed: run_started.elapsed(),
            },
        };

        // Phase 1: users.
        let phase_started = Instant::now();
        let mut factory = match UserFactory::new(now) {
            Ok(factory) => factory,
            Err(error) => return Err(fail(error, 0, Duration::ZERO, 0, Duration::ZERO)),
        };
        let mut writer = BatchWriter::new(
            UserSink::new(&self.store),
            config.batch_size,
            config.user_count,
            Phase::Users,
        );

        for _ in 0..config.user_count {
            if writer.is_drained() && self.cancel.is_cancelled() {
                return Err(fail(
                    SeedError::Cancelled,
                    writer.written(),
                    phase_started.elapsed(),
                    0,
                    Duration::ZERO,
                ));
            }
            let user = factory.next_user(&mut rng);
            if let Err(error) = writer.write(user, progress).await {
                return Err(fail(
                    error,
                    writer.written(),
                    phase_started.elapsed(),
                    0,
                    Duration::ZERO,
                ));
            }
        }
        if let Err(error) = writer.flush(progress).await {
            return Err(fail(
                error,
                writer.written(),
                phase_started.elapsed(),
                0,
                Duration::ZERO,
            ));
        }

        let user_phase = phase_started.elapsed();
        let pool = writer.into_sink().into_pool();
        let users_created = pool.len() as u64;
        info!("User phase complete: {users_created} users in {user_phase:?}");

        // Phase 2: transactions, against the persisted user pool.
        let mut transactions_created = 0;
        let mut transaction_phase = Duration::ZERO;
        if config.transaction_count > 0 {
            if self.cancel.is_cancelled() {
                return Err(fail(
                    SeedError::Cancelled,
                    users_created,
                    user_phase,
                    0,
                    Duration::ZERO,
                ));
            }

            let phase_started = Instant::now();
            let mut factory = match TransactionFactory::new(&pool, config.currency.clone(), now) {
                Ok(factory) => factory,
                Err(error) => {
                    return Err(fail(error, users_created, user_phase, 0, Duration::ZERO))
                }
            };
            let mut writer = BatchWriter::new(
                TransactionSink::new(&self.store),
                config.batch_size,
                config.transaction_count,
                Phase::Transactions,
            );

            for _ in 0..config.transaction_count {
                if writer.is_drained() && self.cancel.is_cancelled() {
                    return Err(fail(
                        SeedError::Cancelled,
                        users_created,
                        user_phase,
                        writer.written(),
                        phase_started.elapsed(),
                    ));
                }
                let txn = match factory.next_transaction(&mut rng) {
                    Ok(txn) => txn,
                    Err(error) => {
                        return Err(fail(
                            error,
                            users_created,
                            user_phase,
                            writer.written(),
                            phase_started.elapsed(),
                        ))
                    }
                };
                if let Err(error) = writer.write(txn, progress).await {
                    return Err(fail(
                        error,
                        users_created,
                        user_phase,
                        writer.written(),
                        phase_started.elapsed(),
                    ));
                }
            }
            if let Err(error) = writer.flush(progress).await {
                return Err(fail(
                    error,
                    users_created,
                    user_phase,
                    writer.written(),
                    phase_started.elapsed(),
                ));
            }

            transaction_phase = phase_started.elapsed();
            transactions_created = writer.written();
            info!(
                "Transaction phase complete: {transactions_created} transactions in {transaction_phase:?}"
            );
        }

        let summary = Summary {
            users_created,
            transactions_created,
            user_phase,
            transaction_phase,
            elapsed: run_started.elapsed(),
        };
        info!(
            "Seeding complete: {} users + {} transactions in {:?} ({:.0} rows/sec)",
            summary.users_created,
            summary.transactions_created,
            summary.elapsed,
            summary.rows_per_second()
        );
        Ok(summary)
    }
}
