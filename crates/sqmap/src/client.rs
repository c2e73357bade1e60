//! Generic client trait: the executor seam.

use crate::error::{SqmError, SqmResult};
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// A trait that unifies database clients and transactions.
///
/// [`crate::Table`] hands every compiled statement to one of these, so the same table can
/// run against a plain connection, a transaction or a pooled client.
pub trait GenericClient: Send + Sync {
    /// Execute a query and return all rows.
    fn query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = SqmResult<Vec<Row>>> + Send;

    /// Execute a statement and return the number of affected rows.
    fn execute(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = SqmResult<u64>> + Send;

    /// Execute one or more semicolon-separated statements without parameters.
    fn batch_execute(&self, sql: &str)
    -> impl std::future::Future<Output = SqmResult<()>> + Send;
}

impl GenericClient for tokio_postgres::Client {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqmResult<Vec<Row>> {
        tokio_postgres::Client::query(self, sql, params)
            .await
            .map_err(SqmError::from)
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqmResult<u64> {
        tokio_postgres::Client::execute(self, sql, params)
            .await
            .map_err(SqmError::from)
    }

    async fn batch_execute(&self, sql: &str) -> SqmResult<()> {
        tokio_postgres::Client::batch_execute(self, sql)
            .await
            .map_err(SqmError::from)
    }
}

impl GenericClient for tokio_postgres::Transaction<'_> {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqmResult<Vec<Row>> {
        tokio_postgres::Transaction::query(self, sql, params)
            .await
            .map_err(SqmError::from)
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqmResult<u64> {
        tokio_postgres::Transaction::execute(self, sql, params)
            .await
            .map_err(SqmError::from)
    }

    async fn batch_execute(&self, sql: &str) -> SqmResult<()> {
        tokio_postgres::Transaction::batch_execute(self, sql)
            .await
            .map_err(SqmError::from)
    }
}

// ===== deadpool-postgres support =====

#[cfg(feature = "pool")]
impl GenericClient for deadpool_postgres::Client {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqmResult<Vec<Row>> {
        // Delegate to the deref target (ClientWrapper / tokio_postgres::Client).
        GenericClient::query(&**self, sql, params).await
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqmResult<u64> {
        GenericClient::execute(&**self, sql, params).await
    }

    async fn batch_execute(&self, sql: &str) -> SqmResult<()> {
        GenericClient::batch_execute(&**self, sql).await
    }
}

#[cfg(feature = "pool")]
impl GenericClient for deadpool_postgres::ClientWrapper {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqmResult<Vec<Row>> {
        GenericClient::query(&**self, sql, params).await
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqmResult<u64> {
        GenericClient::execute(&**self, sql, params).await
    }

    async fn batch_execute(&self, sql: &str) -> SqmResult<()> {
        GenericClient::batch_execute(&**self, sql).await
    }
}
