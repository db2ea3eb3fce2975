use std::sync::Arc;

use crate::{config::AppConfig, dao::score_store::ScoreStore};

/// Cheaply clonable handle passed to every handler.
pub type SharedState = Arc<AppState>;

/// Process-lifetime dependencies handed to every request.
///
/// Nothing here is mutated after startup; the store's pool is the only shared resource.
pub struct AppState {
    store: Arc<dyn ScoreStore>,
    config: AppConfig,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(store: Arc<dyn ScoreStore>, config: AppConfig) -> SharedState {
        Arc::new(Self { store, config })
    }

    /// Backing score store.
    pub fn store(&self) -> &Arc<dyn ScoreStore> {
        &self.store
    }

    /// Variant capabilities loaded at startup.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
