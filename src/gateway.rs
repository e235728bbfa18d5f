use async_trait::async_trait;

use crate::error::WorkbenchError;
use crate::results::ResultSet;

/// Boundary to the relational backend.
///
/// `submit` runs accumulated statement text as one unit. Rows produced by
/// read statements are held until the next [`ExecutionGateway::fetch_all`],
/// which drains them; they are not cached. Commit and rollback are explicit
/// and only ever issued by the session loop, never from inside `submit`.
#[async_trait]
pub trait ExecutionGateway {
    /// Execute `sql` against the backend.
    ///
    /// # Errors
    /// Surfaces the backend's native diagnostic on any failure.
    async fn submit(&mut self, sql: &str) -> Result<(), WorkbenchError>;

    /// Drain the rows held by the most recent successful `submit`.
    ///
    /// # Errors
    /// Returns an error when no submitted result is pending.
    async fn fetch_all(&mut self) -> Result<ResultSet, WorkbenchError>;

    /// Commit the backend's current transaction.
    ///
    /// # Errors
    /// Surfaces the backend's native diagnostic on failure.
    async fn commit(&mut self) -> Result<(), WorkbenchError>;

    /// Roll back the backend's current transaction.
    ///
    /// # Errors
    /// Surfaces the backend's native diagnostic on failure.
    async fn rollback(&mut self) -> Result<(), WorkbenchError>;
}
