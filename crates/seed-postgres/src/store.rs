//! `SeedStore` over tokio-postgres.

use crate::ddl;
use async_trait::async_trait;
use seed_core::{NewTransaction, NewUser, SeedError, SeedStore, UserId};
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, NoTls};
use tracing::{debug, info};

/// PostgreSQL-backed store. Each insert is one multi-row parameterized
/// INSERT, atomic per batch.
pub struct PostgresStore {
    client: Client,
}

impl PostgresStore {
    /// Connect and verify the connection with a probe query.
    pub async fn connect(connection_string: &str) -> Result<Self, SeedError> {
        let (client, connection) = tokio_postgres::connect(connection_string, NoTls)
            .await
            .map_err(pg_err)?;

        // The connection task drives the socket until the client is dropped.
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("PostgreSQL connection error: {e}");
            }
        });

        client.simple_query("SELECT 1").await.map_err(pg_err)?;

        Ok(Self { client })
    }

    /// Create the users/transactions tables and indexes if missing.
    pub async fn ensure_schema(&self) -> Result<(), SeedError> {
        info!("Ensuring users/transactions schema");
        for stmt in [ddl::CREATE_USERS, ddl::CREATE_TRANSACTIONS, ddl::CREATE_INDEXES] {
            self.client.batch_execute(stmt).await.map_err(pg_err)?;
        }
        Ok(())
    }

    /// Drop and recreate the schema. Destroys existing data.
    pub async fn recreate_schema(&self) -> Result<(), SeedError> {
        info!("Dropping and recreating users/transactions schema");
        self.client
            .batch_execute(ddl::DROP_TABLES)
            .await
            .map_err(pg_err)?;
        self.ensure_schema().await
    }

    pub async fn count_users(&self) -> Result<u64, SeedError> {
        self.count("users").await
    }

    pub async fn count_transactions(&self) -> Result<u64, SeedError> {
        self.count("transactions").await
    }

    async fn count(&self, table: &str) -> Result<u64, SeedError> {
        let sql = format!("SELECT COUNT(*) FROM \"{table}\"");
        let row = self.client.query_one(&sql, &[]).await.map_err(pg_err)?;
        let count: i64 = row.get(0);
        Ok(count as u64)
    }
}

#[async_trait]
impl SeedStore for PostgresStore {
    async fn insert_users(&self, batch: &[NewUser]) -> Result<Vec<UserId>, SeedError> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }

        const COLUMNS: usize = 5;
        let sql = format!(
            "INSERT INTO users (display_name, email, phone, activity_tier, created_at) \
             VALUES {} RETURNING id",
            placeholders(batch.len(), COLUMNS)
        );

        let mut params: Vec<Box<dyn ToSql + Sync + Send>> = Vec::with_capacity(batch.len() * COLUMNS);
        for user in batch {
            params.push(Box::new(user.display_name.clone()));
            params.push(Box::new(user.email.clone()));
            params.push(Box::new(user.phone.clone()));
            params.push(Box::new(user.tier.as_str()));
            params.push(Box::new(user.created_at));
        }

        let param_refs: Vec<&(dyn ToSql + Sync)> = params
            .iter()
            .map(|p| p.as_ref() as &(dyn ToSql + Sync))
            .collect();

        let rows = self.client.query(&sql, &param_refs).await.map_err(pg_err)?;
        debug!("Inserted {} users", rows.len());

        Ok(rows.iter().map(|row| row.get::<_, i64>(0)).collect())
    }

    async fn insert_transactions(&self, batch: &[NewTransaction]) -> Result<u64, SeedError> {
        if batch.is_empty() {
            return Ok(0);
        }

        const COLUMNS: usize = 9;
        let sql = format!(
            "INSERT INTO transactions \
             (user_id, amount, currency, txn_type, status, payment_method, \
              payment_provider, failure_reason, created_at) \
             VALUES {}",
            placeholders(batch.len(), COLUMNS)
        );

        let mut params: Vec<Box<dyn ToSql + Sync + Send>> = Vec::with_capacity(batch.len() * COLUMNS);
        for txn in batch {
            params.push(Box::new(txn.user_id));
            params.push(Box::new(txn.amount));
            params.push(Box::new(txn.currency.clone()));
            params.push(Box::new(txn.txn_type.as_str()));
            params.push(Box::new(txn.status.as_str()));
            params.push(Box::new(txn.payment_method.as_str()));
            params.push(Box::new(txn.payment_provider));
            params.push(Box::new(txn.failure_reason.map(|r| r.as_str())));
            params.push(Box::new(txn.created_at));
        }

        let param_refs: Vec<&(dyn ToSql + Sync)> = params
            .iter()
            .map(|p| p.as_ref() as &(dyn ToSql + Sync))
            .collect();

        let inserted = self.client.execute(&sql, &param_refs).await.map_err(pg_err)?;
        debug!("Inserted {inserted} transactions");

        Ok(inserted)
    }
}

/// `($1, $2, ...), ($k+1, ...), ...` for a multi-row VALUES clause.
fn placeholders(rows: usize, columns: usize) -> String {
    let mut groups = Vec::with_capacity(rows);
    let mut idx = 1;
    for _ in 0..rows {
        let row: Vec<String> = (0..columns)
            .map(|_| {
                let p = format!("${idx}");
                idx += 1;
                p
            })
            .collect();
        groups.push(format!("({})", row.join(", ")));
    }
    groups.join(", ")
}

fn pg_err(e: tokio_postgres::Error) -> SeedError {
    SeedError::Persistence(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_number_across_rows() {
        assert_eq!(placeholders(1, 2), "($1, $2)");
        assert_eq!(placeholders(2, 3), "($1, $2, $3), ($4, $5, $6)");
    }
}
