use std::{env, str::FromStr, sync::Arc, time::Duration};

use super::{
    ScoreStore,
    error::{SqlDaoError, SqlResult},
};

/// Environment variable selecting the storage backend.
const STORE_BACKEND_ENV: &str = "LEADERBOARD_STORE";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Connection pool limits shared by every backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Upper bound on simultaneously open connections.
    pub max_connections: u32,
    /// How long a request waits for a free connection before failing.
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        }
    }
}

impl PoolConfig {
    /// Read `STORE_MAX_CONNECTIONS` and `STORE_ACQUIRE_TIMEOUT_SECS`, keeping defaults for unset values.
    pub fn from_env() -> SqlResult<Self> {
        let defaults = Self::default();
        let max_connections =
            optional_parsed("STORE_MAX_CONNECTIONS")?.unwrap_or(defaults.max_connections);
        let acquire_timeout = optional_parsed("STORE_ACQUIRE_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.acquire_timeout);
        Ok(Self {
            max_connections,
            acquire_timeout,
        })
    }
}

/// Process-lifetime description of the backing store, built once at startup.
#[derive(Debug, Clone)]
pub enum StoreConfig {
    /// MySQL server reached over TCP.
    #[cfg(feature = "mysql-store")]
    MySql(super::mysql::MySqlConfig),
    /// Local SQLite database file.
    #[cfg(feature = "sqlite-store")]
    Sqlite(super::sqlite::SqliteConfig),
}

impl StoreConfig {
    /// Build the configuration of the backend named by `LEADERBOARD_STORE` (default `mysql`).
    pub fn from_env() -> SqlResult<Self> {
        let backend = env::var(STORE_BACKEND_ENV).unwrap_or_else(|_| "mysql".into());
        match backend.trim().to_ascii_lowercase().as_str() {
            #[cfg(feature = "mysql-store")]
            "mysql" => Ok(Self::MySql(super::mysql::MySqlConfig::from_env()?)),
            #[cfg(feature = "sqlite-store")]
            "sqlite" => Ok(Self::Sqlite(super::sqlite::SqliteConfig::from_env()?)),
            _ => Err(SqlDaoError::UnsupportedBackend { backend }),
        }
    }

    /// Short backend name used in logs.
    pub fn backend(&self) -> &'static str {
        match self {
            #[cfg(feature = "mysql-store")]
            Self::MySql(_) => "mysql",
            #[cfg(feature = "sqlite-store")]
            Self::Sqlite(_) => "sqlite",
        }
    }

    /// Create the store with a lazily connecting pool.
    ///
    /// No connection is opened here, so the server can start while the
    /// database is still unreachable.
    pub fn connect_lazy(&self) -> Arc<dyn ScoreStore> {
        match self {
            #[cfg(feature = "mysql-store")]
            Self::MySql(config) => Arc::new(super::mysql::MySqlScoreStore::connect_lazy(config)),
            #[cfg(feature = "sqlite-store")]
            Self::Sqlite(config) => Arc::new(super::sqlite::SqliteScoreStore::connect_lazy(config)),
        }
    }
}

/// Read a required, non-empty environment variable.
pub(super) fn required(var: &'static str) -> SqlResult<String> {
    env::var(var)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or(SqlDaoError::MissingEnvVar { var })
}

/// Read and parse an optional environment variable.
pub(super) fn optional_parsed<T: FromStr>(var: &'static str) -> SqlResult<Option<T>> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| SqlDaoError::InvalidEnvVar { var, value }),
        _ => Ok(None),
    }
}
