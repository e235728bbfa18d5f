use deadpool_postgres::Config as PgConfig;
use serde::Serialize;

use crate::error::WorkbenchError;

/// Connection settings for the PostgreSQL backend.
///
/// The password is excluded from serialization so the startup log line never
/// carries it.
#[derive(Clone, Serialize)]
pub struct ConnectSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub dbname: String,
}

impl ConnectSettings {
    /// Validate that every required field is present.
    ///
    /// # Errors
    /// Returns `WorkbenchError::ConfigError` naming the missing field.
    pub fn validate(&self) -> Result<(), WorkbenchError> {
        if self.dbname.is_empty() {
            return Err(WorkbenchError::ConfigError("dbname is required".to_string()));
        }
        if self.host.is_empty() {
            return Err(WorkbenchError::ConfigError("host is required".to_string()));
        }
        if self.port == 0 {
            return Err(WorkbenchError::ConfigError("port is required".to_string()));
        }
        if self.user.is_empty() {
            return Err(WorkbenchError::ConfigError("user is required".to_string()));
        }
        Ok(())
    }

    pub(crate) fn pg_config(&self) -> PgConfig {
        let mut cfg = PgConfig::new();
        cfg.host = Some(self.host.clone());
        cfg.port = Some(self.port);
        cfg.user = Some(self.user.clone());
        cfg.password = Some(self.password.clone());
        cfg.dbname = Some(self.dbname.clone());
        cfg
    }
}
