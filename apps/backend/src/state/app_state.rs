use std::sync::Arc;

use crate::adapters::InMemoryStore;
use crate::config::AppConfig;
use crate::repos::GameStore;
use crate::services::{GameService, SnapshotCache};

/// Application state containing shared resources.
#[derive(Clone)]
pub struct AppState {
    /// The session coordinator; handlers never touch the store directly.
    service: Arc<GameService>,
}

impl AppState {
    pub fn new(store: Arc<dyn GameStore>, config: &AppConfig) -> Self {
        let cache = SnapshotCache::new(&config.cache);
        Self {
            service: Arc::new(GameService::new(
                store,
                cache,
                config.coordinator.clone(),
            )),
        }
    }

    pub fn service(&self) -> &Arc<GameService> {
        &self.service
    }

    /// State over a fresh in-memory store with default bounds.
    pub fn in_memory(config: &AppConfig) -> Self {
        Self::new(Arc::new(InMemoryStore::new()), config)
    }
}
