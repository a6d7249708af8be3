//! Read-through snapshot cache.
//!
//! Reads (`get`, `list`) are served through this cache; every successful
//! mutation clears it wholesale. The blanket policy is deliberately coarse:
//! it matches the behavior existing clients observe, and with a
//! capacity-bounded TTL cache the cost of over-eviction is negligible.
//! Lookups deduplicate concurrent misses per key, and a failed load is
//! never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use uuid::Uuid;

use crate::config::CacheConfig;
use crate::domain::snapshot::GameSnapshot;
use crate::domain::state::GameStatus;
use crate::errors::domain::DomainError;

pub struct SnapshotCache {
    games: Cache<Uuid, GameSnapshot>,
    /// List results keyed by the status filter; `None` is the unfiltered
    /// listing.
    lists: Cache<Option<GameStatus>, Arc<Vec<GameSnapshot>>>,
}

impl SnapshotCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            games: Self::build(config.capacity, config.ttl),
            lists: Self::build(config.capacity, config.ttl),
        }
    }

    fn build<K, V>(capacity: u64, ttl: Duration) -> Cache<K, V>
    where
        K: std::hash::Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build()
    }

    pub async fn game<F>(&self, game_id: Uuid, init: F) -> Result<GameSnapshot, DomainError>
    where
        F: std::future::Future<Output = Result<GameSnapshot, DomainError>>,
    {
        self.games
            .try_get_with(game_id, init)
            .await
            .map_err(unwrap_shared)
    }

    pub async fn list<F>(
        &self,
        status: Option<GameStatus>,
        init: F,
    ) -> Result<Arc<Vec<GameSnapshot>>, DomainError>
    where
        F: std::future::Future<Output = Result<Arc<Vec<GameSnapshot>>, DomainError>>,
    {
        self.lists
            .try_get_with(status, init)
            .await
            .map_err(unwrap_shared)
    }

    /// Blanket eviction, called on every successful mutation.
    pub fn invalidate_all(&self) {
        self.games.invalidate_all();
        self.lists.invalidate_all();
    }
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

/// moka shares an init error between waiters as an `Arc`; our errors are
/// cheap to clone, so hand the caller an owned value.
fn unwrap_shared(err: Arc<DomainError>) -> DomainError {
    (*err).clone()
}
