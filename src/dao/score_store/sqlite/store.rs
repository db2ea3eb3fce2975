use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteRow};

use super::super::sql::sql_score_store;
use super::config::SqliteConfig;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS scores (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    initials TEXT NOT NULL,
    score REAL NOT NULL,
    color INTEGER,
    timestamp TEXT NOT NULL,
    game TEXT NOT NULL,
    ip_addr TEXT
)";

const CREATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_scores_game_score ON scores (game, score)";

/// [`ScoreStore`](crate::dao::score_store::ScoreStore) backed by a local SQLite file.
#[derive(Clone)]
pub struct SqliteScoreStore {
    pool: SqlitePool,
}

impl SqliteScoreStore {
    /// Build the pool without opening the database file yet.
    pub fn connect_lazy(config: &SqliteConfig) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool.max_connections)
            .acquire_timeout(config.pool.acquire_timeout)
            .connect_lazy_with(options);

        Self { pool }
    }
}

sql_score_store!(SqliteScoreStore, SqliteRow, [CREATE_TABLE, CREATE_INDEX]);
