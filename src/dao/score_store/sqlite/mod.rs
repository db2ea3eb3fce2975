mod config;
mod store;

pub use config::SqliteConfig;
pub use store::SqliteScoreStore;
