use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};

use super::super::sql::sql_score_store;
use super::config::MySqlConfig;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS scores (
    id INT AUTO_INCREMENT PRIMARY KEY,
    initials VARCHAR(3) NOT NULL,
    score DOUBLE NOT NULL,
    color INT NULL,
    timestamp DATETIME NOT NULL,
    game VARCHAR(255) NOT NULL,
    ip_addr VARCHAR(45) NULL,
    INDEX idx_scores_game_score (game, score)
)";

/// [`ScoreStore`](crate::dao::score_store::ScoreStore) backed by a MySQL connection pool.
#[derive(Clone)]
pub struct MySqlScoreStore {
    pool: MySqlPool,
}

impl MySqlScoreStore {
    /// Build the pool without opening any connection yet.
    pub fn connect_lazy(config: &MySqlConfig) -> Self {
        let mut options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .database(&config.database);
        if let Some(password) = config.password.as_deref() {
            options = options.password(password);
        }

        let pool = MySqlPoolOptions::new()
            .max_connections(config.pool.max_connections)
            .acquire_timeout(config.pool.acquire_timeout)
            .connect_lazy_with(options);

        Self { pool }
    }
}

sql_score_store!(MySqlScoreStore, MySqlRow, [CREATE_TABLE]);
