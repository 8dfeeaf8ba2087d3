use diesel::r2d2::PoolError;
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("connection pool error: {source}")]
    Pool {
        #[from]
        source: PoolError,
    },

    #[error("query error: {source}")]
    Query {
        #[from]
        source: diesel::result::Error,
    },

    #[error("failed to apply migration to version {version}: {source}")]
    Migration { version: i32, source: diesel::result::Error },

    #[error("storage task failed: {source}")]
    Task {
        #[from]
        source: JoinError,
    },
}

impl StorageError {
    pub fn migration(version: i32, source: diesel::result::Error) -> Self {
        Self::Migration { version, source }
    }
}
