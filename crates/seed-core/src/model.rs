//! Domain records and vocabularies for generated users and transactions.
//!
//! All records are created once by the generators and never mutated after
//! persist. Identifiers are assigned by the store, so freshly generated
//! records (`NewUser`, `NewTransaction`) carry no id; the pipeline pairs
//! store-assigned ids with tiers into `PersistedUser` for the transaction
//! phase.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Store-assigned user identifier.
pub type UserId = i64;

/// Per-user activity classification.
///
/// The tier controls how many transactions a user is likely to receive
/// (via [`ActivityTier::transaction_weight`]) and, for `New`, the
/// creation-date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityTier {
    High,
    Normal,
    Low,
    New,
}

impl ActivityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityTier::High => "HIGH",
            ActivityTier::Normal => "NORMAL",
            ActivityTier::Low => "LOW",
            ActivityTier::New => "NEW",
        }
    }

    /// Fixed multiplier applied when selecting a transaction owner.
    ///
    /// High-tier users receive proportionally more transactions than
    /// low/new-tier users. These are constants of the vocabulary, not
    /// sampled values.
    pub fn transaction_weight(&self) -> f64 {
        match self {
            ActivityTier::High => 6.0,
            ActivityTier::Normal => 1.0,
            ActivityTier::Low => 0.3,
            ActivityTier::New => 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Payment,
    Refund,
    Chargeback,
    Fee,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Payment => "PAYMENT",
            TransactionType::Refund => "REFUND",
            TransactionType::Chargeback => "CHARGEBACK",
            TransactionType::Fee => "FEE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Success,
    Failed,
    Pending,
    Cancelled,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Success => "SUCCESS",
            TransactionStatus::Failed => "FAILED",
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Cancelled => "CANCELLED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Upi,
    CreditCard,
    DebitCard,
    NetBanking,
    Wallet,
    Other,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Upi => "UPI",
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::DebitCard => "DEBIT_CARD",
            PaymentMethod::NetBanking => "NET_BANKING",
            PaymentMethod::Wallet => "WALLET",
            PaymentMethod::Other => "OTHER",
        }
    }
}

/// Fixed vocabulary of failure reasons for FAILED transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureReason {
    NetworkTimeout,
    InsufficientFunds,
    BankDeclined,
    CardExpired,
    LimitExceeded,
    AuthFailed,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::NetworkTimeout => "NETWORK_TIMEOUT",
            FailureReason::InsufficientFunds => "INSUFFICIENT_FUNDS",
            FailureReason::BankDeclined => "BANK_DECLINED",
            FailureReason::CardExpired => "CARD_EXPIRED",
            FailureReason::LimitExceeded => "LIMIT_EXCEEDED",
            FailureReason::AuthFailed => "AUTH_FAILED",
        }
    }
}

/// A generated user that has not been persisted yet (no id assigned).
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub display_name: String,
    /// Unique within the generated set.
    pub email: String,
    pub phone: String,
    pub tier: ActivityTier,
    pub created_at: DateTime<Utc>,
}

/// A persisted user reference carried into the transaction phase.
#[derive(Debug, Clone, Copy)]
pub struct PersistedUser {
    pub id: UserId,
    pub tier: ActivityTier,
}

/// A generated transaction that has not been persisted yet.
#[derive(Debug, Clone, Serialize)]
pub struct NewTransaction {
    /// Foreign reference to an already-persisted user.
    pub user_id: UserId,
    /// Always positive; scale 2.
    pub amount: Decimal,
    pub currency: String,
    pub txn_type: TransactionType,
    pub status: TransactionStatus,
    pub payment_method: PaymentMethod,
    /// Derived from the payment method via a fixed provider pool.
    pub payment_provider: &'static str,
    /// Present iff `status` is `Failed`.
    pub failure_reason: Option<FailureReason>,
    /// Pairwise distinct across the entire generated set.
    pub created_at: DateTime<Utc>,
}
