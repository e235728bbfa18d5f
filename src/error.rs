use thiserror::Error;

/// Errors surfaced by the workbench.
#[derive(Debug, Error)]
pub enum WorkbenchError {
    #[error(transparent)]
    PostgresError(#[from] tokio_postgres::Error),

    #[error(transparent)]
    PoolError(#[from] deadpool_postgres::PoolError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Input error: {0}")]
    InputError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),
}
