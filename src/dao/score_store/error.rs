//! Error types shared by the SQL storage implementations.

use thiserror::Error;

use crate::dao::storage::StorageError;

/// Convenient result alias returning [`SqlDaoError`] failures.
pub type SqlResult<T> = Result<T, SqlDaoError>;

/// Failures that can occur while configuring or talking to the SQL backend.
#[derive(Debug, Error)]
pub enum SqlDaoError {
    /// Required environment variable is missing.
    #[error("missing database environment variable `{var}`")]
    MissingEnvVar { var: &'static str },
    /// Environment variable is present but cannot be parsed.
    #[error("invalid value `{value}` for environment variable `{var}`")]
    InvalidEnvVar { var: &'static str, value: String },
    /// The selected backend is unknown or was compiled out.
    #[error("unsupported store backend `{backend}`")]
    UnsupportedBackend { backend: String },
    /// No connection could be checked out of the pool.
    #[error("Database connection failed")]
    Acquire {
        #[source]
        source: sqlx::Error,
    },
    /// The insert transaction was rejected.
    #[error("failed to insert score for game `{game}`")]
    Insert {
        game: String,
        #[source]
        source: sqlx::Error,
    },
    /// The ranking select was rejected.
    #[error("failed to load scores for game `{game}`")]
    Select {
        game: String,
        #[source]
        source: sqlx::Error,
    },
    /// A returned row did not match the expected layout.
    #[error("failed to decode score row for game `{game}`")]
    Decode {
        game: String,
        #[source]
        source: sqlx::Error,
    },
    /// Creating the table or its index failed.
    #[error("failed to ensure `scores` schema")]
    Schema {
        #[source]
        source: sqlx::Error,
    },
}

impl From<SqlDaoError> for StorageError {
    fn from(err: SqlDaoError) -> Self {
        let message = err.to_string();
        match err {
            SqlDaoError::Acquire { source } => StorageError::unavailable(message, source),
            SqlDaoError::Insert { source, .. } | SqlDaoError::Schema { source } => {
                StorageError::write_failed(message, source)
            }
            SqlDaoError::Select { source, .. } | SqlDaoError::Decode { source, .. } => {
                StorageError::read_failed(message, source)
            }
            other @ (SqlDaoError::MissingEnvVar { .. }
            | SqlDaoError::InvalidEnvVar { .. }
            | SqlDaoError::UnsupportedBackend { .. }) => StorageError::unavailable(message, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_failures_map_to_unavailable() {
        let err: StorageError = SqlDaoError::Acquire {
            source: sqlx::Error::PoolTimedOut,
        }
        .into();
        assert!(matches!(err, StorageError::Unavailable { .. }));
    }

    #[test]
    fn insert_failures_map_to_write_failed_and_keep_cause() {
        let err: StorageError = SqlDaoError::Insert {
            game: "pacman".into(),
            source: sqlx::Error::PoolClosed,
        }
        .into();
        assert!(matches!(err, StorageError::WriteFailed { .. }));
        assert_eq!(err.cause(), sqlx::Error::PoolClosed.to_string());
    }

    #[test]
    fn select_failures_map_to_read_failed() {
        let err: StorageError = SqlDaoError::Select {
            game: "pacman".into(),
            source: sqlx::Error::RowNotFound,
        }
        .into();
        assert!(matches!(err, StorageError::ReadFailed { .. }));
    }
}
