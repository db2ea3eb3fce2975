use std::path::PathBuf;

use super::super::{config::PoolConfig, error::SqlResult};

const DEFAULT_PATH: &str = "leaderboard.db";

/// Runtime configuration describing which SQLite file backs the leaderboard.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Database file, created together with the table on first use.
    pub path: PathBuf,
    /// Pool size and acquire timeout.
    pub pool: PoolConfig,
}

impl SqliteConfig {
    /// Construct a configuration pointing at `path`; the file is created on first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pool: PoolConfig::default(),
        }
    }

    /// Build a configuration from `SQLITE_PATH`, defaulting to `leaderboard.db`.
    pub fn from_env() -> SqlResult<Self> {
        let path = std::env::var_os("SQLITE_PATH")
            .map(PathBuf::from)
            .filter(|path| !path.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PATH));

        Ok(Self {
            path,
            pool: PoolConfig::from_env()?,
        })
    }
}
