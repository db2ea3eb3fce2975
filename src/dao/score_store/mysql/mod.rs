mod config;
mod store;

pub use config::MySqlConfig;
pub use store::MySqlScoreStore;
