//! DDL for the seeded users/transactions schema.
//!
//! Schema migration proper is owned by an external tool; these statements
//! are the minimal operability surface for standing up a fresh database
//! to seed into.

pub const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id            BIGSERIAL PRIMARY KEY,
    display_name  TEXT NOT NULL,
    email         TEXT NOT NULL UNIQUE,
    phone         TEXT NOT NULL,
    activity_tier TEXT NOT NULL,
    created_at    TIMESTAMPTZ NOT NULL
)"#;

pub const CREATE_TRANSACTIONS: &str = r#"
CREATE TABLE IF NOT EXISTS transactions (
    id               BIGSERIAL PRIMARY KEY,
    user_id          BIGINT NOT NULL REFERENCES users (id),
    amount           NUMERIC(12, 2) NOT NULL CHECK (amount > 0),
    currency         TEXT NOT NULL,
    txn_type         TEXT NOT NULL,
    status           TEXT NOT NULL,
    payment_method   TEXT NOT NULL,
    payment_provider TEXT NOT NULL,
    failure_reason   TEXT,
    created_at       TIMESTAMPTZ NOT NULL
)"#;

pub const CREATE_INDEXES: &str = r#"
CREATE INDEX IF NOT EXISTS idx_transactions_user_id ON transactions (user_id);
CREATE INDEX IF NOT EXISTS idx_transactions_created_at ON transactions (created_at)"#;

pub const DROP_TABLES: &str = r#"
DROP TABLE IF EXISTS transactions;
DROP TABLE IF EXISTS users"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transactions_reference_users() {
        assert!(CREATE_TRANSACTIONS.contains("REFERENCES users (id)"));
        assert!(CREATE_TRANSACTIONS.contains("CHECK (amount > 0)"));
    }

    #[test]
    fn drop_removes_dependents_first() {
        let txn_pos = DROP_TABLES.find("transactions").unwrap();
        let users_pos = DROP_TABLES.find("users").unwrap();
        assert!(txn_pos < users_pos);
    }
}
