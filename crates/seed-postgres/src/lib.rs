//! PostgreSQL implementation of the txnseed storage boundary.
//!
//! One multi-row parameterized INSERT per batch; user inserts use
//! `RETURNING id` so the pipeline can hand resolved identifiers to the
//! transaction phase.

pub mod ddl;
pub mod store;

pub use store::PostgresStore;
