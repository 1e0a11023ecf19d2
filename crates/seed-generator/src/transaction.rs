//! Synthetic transaction record generation.

use crate::sampler::WeightedSampler;
use crate::timestamp::TimestampAllocator;
use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use seed_core::{
    FailureReason, NewTransaction, PaymentMethod, PersistedUser, SeedError, TransactionStatus,
    TransactionType, UserId,
};

const TYPE_WEIGHTS: [(TransactionType, f64); 4] = [
    (TransactionType::Payment, 85.0),
    (TransactionType::Refund, 10.0),
    (TransactionType::Chargeback, 3.0),
    (TransactionType::Fee, 2.0),
];

const STATUS_WEIGHTS: [(TransactionStatus, f64); 4] = [
    (TransactionStatus::Success, 75.0),
    (TransactionStatus::Failed, 15.0),
    (TransactionStatus::Pending, 8.0),
    (TransactionStatus::Cancelled, 2.0),
];

const METHOD_WEIGHTS: [(PaymentMethod, f64); 6] = [
    (PaymentMethod::Upi, 50.0),
    (PaymentMethod::CreditCard, 20.0),
    (PaymentMethod::DebitCard, 15.0),
    (PaymentMethod::NetBanking, 8.0),
    (PaymentMethod::Wallet, 5.0),
    (PaymentMethod::Other, 2.0),
];

const FAILURE_REASONS: [FailureReason; 6] = [
    FailureReason::NetworkTimeout,
    FailureReason::InsufficientFunds,
    FailureReason::BankDeclined,
    FailureReason::CardExpired,
    FailureReason::LimitExceeded,
    FailureReason::AuthFailed,
];

/// Fixed method → provider-pool mapping. The provider is a random pick
/// within the chosen method's pool.
fn provider_pool(method: PaymentMethod) -> &'static [&'static str] {
    match method {
        PaymentMethod::Upi => &["PhonePe", "Google Pay", "Paytm UPI", "BHIM"],
        PaymentMethod::CreditCard => &["Visa", "Mastercard", "American Express", "RuPay"],
        PaymentMethod::DebitCard => &["Visa Debit", "Maestro", "RuPay Debit"],
        PaymentMethod::NetBanking => &["HDFC Bank", "ICICI Bank", "SBI", "Axis Bank", "Kotak"],
        PaymentMethod::Wallet => &["Paytm Wallet", "Amazon Pay", "Mobikwik", "Freecharge"],
        PaymentMethod::Other => &["Cash on Delivery", "Gift Card"],
    }
}

/// Type-conditioned amount in integer cents, converted exactly to a
/// scale-2 decimal (no float formatting involved).
fn sample_amount<R: Rng>(txn_type: TransactionType, rng: &mut R) -> Decimal {
    let cents: i64 = match txn_type {
        // Tiered: 70% in [100, 5000), 20% in [5000, 50000), 10% in [50000, 500000).
        TransactionType::Payment | TransactionType::Chargeback => {
            let tier: f64 = rng.random_range(0.0..1.0);
            if tier < 0.7 {
                rng.random_range(10_000..500_000)
            } else if tier < 0.9 {
                rng.random_range(500_000..5_000_000)
            } else {
                rng.random_range(5_000_000..50_000_000)
            }
        }
        // Uniform in [50, 5000).
        TransactionType::Refund => rng.random_range(5_000..500_000),
        // Uniform in [5, 500).
        TransactionType::Fee => rng.random_range(500..50_000),
    };
    Decimal::new(cents, 2)
}

/// Produces synthetic transaction records against an already-persisted
/// user pool.
///
/// The owning user is drawn from a sampler weighted by each user's tier
/// multiplier, so high-activity users receive proportionally more
/// transactions. Timestamps come from the owned [`TimestampAllocator`] and
/// are therefore globally unique across the run.
pub struct TransactionFactory {
    user_sampler: WeightedSampler<UserId>,
    type_sampler: WeightedSampler<TransactionType>,
    status_sampler: WeightedSampler<TransactionStatus>,
    method_sampler: WeightedSampler<PaymentMethod>,
    allocator: TimestampAllocator,
    currency: String,
}

impl TransactionFactory {
    /// Fails with a configuration error if `user_pool` is empty:
    /// transactions cannot be generated without persisted owners.
    pub fn new(
        user_pool: &[PersistedUser],
        currency: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, SeedError> {
        if user_pool.is_empty() {
            return Err(SeedError::Config(
                "user pool is empty: transactions require previously persisted users".to_string(),
            ));
        }

        let user_sampler = WeightedSampler::new(
            user_pool
                .iter()
                .map(|u| (u.id, u.tier.transaction_weight()))
                .collect(),
        )?;

        Ok(Self {
            user_sampler,
            type_sampler: WeightedSampler::new(TYPE_WEIGHTS.to_vec())?,
            status_sampler: WeightedSampler::new(STATUS_WEIGHTS.to_vec())?,
            method_sampler: WeightedSampler::new(METHOD_WEIGHTS.to_vec())?,
            allocator: TimestampAllocator::new(now),
            currency: currency.into(),
        })
    }

    /// Generate one transaction.
    pub fn next_transaction<R: Rng>(&mut self, rng: &mut R) -> Result<NewTransaction, SeedError> {
        let user_id = *self.user_sampler.sample(rng);
        let txn_type = *self.type_sampler.sample(rng);
        let status = *self.status_sampler.sample(rng);
        let method = *self.method_sampler.sample(rng);

        let pool = provider_pool(method);
        let payment_provider = pool[rng.random_range(0..pool.len())];

        let failure_reason = (status == TransactionStatus::Failed)
            .then(|| FAILURE_REASONS[rng.random_range(0..FAILURE_REASONS.len())]);

        let created_at = self.allocator.allocate(rng)?;

        Ok(NewTransaction {
            user_id,
            amount: sample_amount(txn_type, rng),
            currency: self.currency.clone(),
            txn_type,
            status,
            payment_method: method,
            payment_provider,
            failure_reason,
            created_at,
        })
    }

    /// Lazy sequence of `count` transactions. Fallible per item because
    /// the timestamp retry budget can run out.
    pub fn generate<'a, R: Rng>(
        &'a mut self,
        count: u64,
        rng: &'a mut R,
    ) -> TransactionIter<'a, R> {
        TransactionIter {
            factory: self,
            rng,
            remaining: count,
        }
    }

    /// Timestamps issued so far (equals transactions generated).
    pub fn issued_timestamps(&self) -> usize {
        self.allocator.issued()
    }
}

/// Iterator over freshly generated transactions.
pub struct TransactionIter<'a, R: Rng> {
    factory: &'a mut TransactionFactory,
    rng: &'a mut R,
    remaining: u64,
}

impl<R: Rng> Iterator for TransactionIter<'_, R> {
    type Item = Result<NewTransaction, SeedError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.factory.next_transaction(self.rng))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl<R: Rng> ExactSizeIterator for TransactionIter<'_, R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use seed_core::ActivityTier;

    fn pool() -> Vec<PersistedUser> {
        vec![
            PersistedUser {
                id: 1,
                tier: ActivityTier::High,
            },
            PersistedUser {
                id: 2,
                tier: ActivityTier::Normal,
            },
            PersistedUser {
                id: 3,
                tier: ActivityTier::Low,
            },
            PersistedUser {
                id: 4,
                tier: ActivityTier::New,
            },
        ]
    }

    #[test]
    fn empty_user_pool_is_a_configuration_error() {
        let result = TransactionFactory::new(&[], "INR", Utc::now());
        assert!(matches!(result, Err(SeedError::Config(_))));
    }

    #[test]
    fn amounts_are_always_positive() {
        let mut factory = TransactionFactory::new(&pool(), "INR", Utc::now()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for result in factory.generate(10_000, &mut rng) {
            let txn = result.unwrap();
            assert!(txn.amount > Decimal::ZERO, "{:?}", txn);
        }
    }

    #[test]
    fn failure_reason_present_iff_failed() {
        let mut factory = TransactionFactory::new(&pool(), "INR", Utc::now()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let mut failed = 0;
        for result in factory.generate(10_000, &mut rng) {
            let txn = result.unwrap();
            if txn.status == TransactionStatus::Failed {
                assert!(txn.failure_reason.is_some());
                failed += 1;
            } else {
                assert!(txn.failure_reason.is_none());
            }
        }
        // ~15% of 10k
        assert!(failed > 1_000 && failed < 2_000, "failed = {failed}");
    }

    #[test]
    fn providers_come_from_the_method_pool() {
        let mut factory = TransactionFactory::new(&pool(), "INR", Utc::now()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for result in factory.generate(5_000, &mut rng) {
            let txn = result.unwrap();
            assert!(provider_pool(txn.payment_method).contains(&txn.payment_provider));
        }
    }

    #[test]
    fn high_tier_users_receive_more_transactions() {
        let mut factory = TransactionFactory::new(&pool(), "INR", Utc::now()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let mut counts = std::collections::HashMap::new();
        for result in factory.generate(20_000, &mut rng) {
            *counts.entry(result.unwrap().user_id).or_insert(0u32) += 1;
        }

        // Weights 6.0 / 1.0 / 0.3 / 0.1
        assert!(counts[&1] > counts[&2] * 4);
        assert!(counts[&2] > counts[&3]);
        assert!(counts[&3] > counts[&4]);
    }

    #[test]
    fn fee_amounts_stay_in_their_band() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1_000 {
            let amount = sample_amount(TransactionType::Fee, &mut rng);
            assert!(amount >= Decimal::new(500, 2));
            assert!(amount < Decimal::new(50_000, 2));
        }
    }

    #[test]
    fn timestamps_are_unique_across_generated_transactions() {
        let mut factory = TransactionFactory::new(&pool(), "INR", Utc::now()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let mut seen = std::collections::HashSet::new();
        for result in factory.generate(10_000, &mut rng) {
            let txn = result.unwrap();
            assert!(seen.insert(txn.created_at.timestamp_micros()));
        }
        assert_eq!(factory.issued_timestamps(), 10_000);
    }
}
