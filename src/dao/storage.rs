use std::error::Error;
use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage backends regardless of the underlying database.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No connection to the database could be acquired.
    #[error("storage unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// The insert transaction failed after a connection was acquired.
    #[error("storage write failed: {message}")]
    WriteFailed {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// The ranking select failed after a connection was acquired.
    #[error("storage read failed: {message}")]
    ReadFailed {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }

    /// Construct a write failure from any backend failure.
    pub fn write_failed(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::WriteFailed {
            message,
            source: Box::new(source),
        }
    }

    /// Construct a read failure from any backend failure.
    pub fn read_failed(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::ReadFailed {
            message,
            source: Box::new(source),
        }
    }

    /// Root cause reported by the backend driver.
    pub fn cause(&self) -> String {
        match self {
            StorageError::Unavailable { source, .. }
            | StorageError::WriteFailed { source, .. }
            | StorageError::ReadFailed { source, .. } => source.to_string(),
        }
    }
}
