use async_trait::async_trait;
use deadpool_postgres::{Object, Runtime};
use tokio_postgres::NoTls;
use tracing::debug;

use super::config::ConnectSettings;
use super::query::build_result_set;
use crate::error::WorkbenchError;
use crate::gateway::ExecutionGateway;
use crate::results::ResultSet;

/// The one-connection PostgreSQL gateway.
///
/// A single pooled connection is checked out at startup and owned for the
/// whole session; dropping the gateway returns it on every exit path. Rows
/// from the most recent submit are held until drained by `fetch_all`.
pub struct PostgresGateway {
    conn: Object,
    pending: Option<ResultSet>,
}

impl PostgresGateway {
    /// Connect to the backend described by `settings`.
    ///
    /// # Errors
    /// Returns `WorkbenchError::ConfigError` if required fields are missing,
    /// `WorkbenchError::ConnectionError` if pool creation fails, or the pool's
    /// error if no connection can be checked out.
    pub async fn connect(settings: &ConnectSettings) -> Result<Self, WorkbenchError> {
        settings.validate()?;

        let pool = settings
            .pg_config()
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| {
                WorkbenchError::ConnectionError(format!("Failed to create Postgres pool: {e}"))
            })?;

        let conn = pool.get().await?;
        Ok(Self {
            conn,
            pending: None,
        })
    }
}

#[async_trait]
impl ExecutionGateway for PostgresGateway {
    async fn submit(&mut self, sql: &str) -> Result<(), WorkbenchError> {
        // A failed submit must not leave stale rows behind.
        self.pending = None;
        debug!(statement = sql, "submitting");
        let messages = self.conn.simple_query(sql).await?;
        self.pending = Some(build_result_set(&messages)?);
        Ok(())
    }

    async fn fetch_all(&mut self) -> Result<ResultSet, WorkbenchError> {
        self.pending.take().ok_or_else(|| {
            WorkbenchError::ExecutionError("no submitted result to fetch".to_string())
        })
    }

    async fn commit(&mut self) -> Result<(), WorkbenchError> {
        self.conn.batch_execute("COMMIT").await?;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), WorkbenchError> {
        self.conn.batch_execute("ROLLBACK").await?;
        Ok(())
    }
}
