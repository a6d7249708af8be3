//! The session coordinator.
//!
//! `GameService` is the only component that touches the store and the
//! cache. It serializes operations per game id, keeps every store call
//! behind a deadline, commits through the store's compare-and-swap gate,
//! and clears the read cache after every accepted mutation.
//!
//! Locking is layered: the per-game mutex linearizes operations within this
//! process so the load-validate-mutate-persist cycle runs alone, and the
//! revision check at commit time is the gate that holds even if a store
//! implementation is shared with other writers. Operations on different
//! games never contend. The state machine itself never retries; only this
//! coordinator re-runs a cycle, and only a bounded number of times.

use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::CoordinatorConfig;
use crate::domain::snapshot::{self, GameSnapshot};
use crate::domain::state::{Cell, Game, GameStatus, Player};
use crate::domain::transitions;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::repos::{self, GameStore};
use crate::services::SnapshotCache;

pub struct GameService {
    store: Arc<dyn GameStore>,
    cache: SnapshotCache,
    /// Per-game locks, created on first use and dropped once the game
    /// finishes. A finished game accepts no further mutations, so a late
    /// operation that recreates the entry still commits through the CAS
    /// gate or is rejected by the status check.
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
    config: CoordinatorConfig,
}

impl GameService {
    pub fn new(store: Arc<dyn GameStore>, cache: SnapshotCache, config: CoordinatorConfig) -> Self {
        Self {
            store,
            cache,
            locks: DashMap::new(),
            config,
        }
    }

    /// Create a new empty game. Never observes existing state.
    pub async fn create(&self) -> Result<Uuid, DomainError> {
        let game = transitions::new_game();
        let game_id = game.game_id;
        info!(%game_id, "creating new game");

        self.timed("insert_game", self.store.insert_game(game)).await?;
        self.cache.invalidate_all();

        Ok(game_id)
    }

    /// Join a game by id. Linearized per game so two concurrent joiners can
    /// never receive the same symbol.
    pub async fn join(&self, game_id: Uuid, name: &str) -> Result<Player, DomainError> {
        let lock = self.game_lock(game_id);
        let _guard = lock.lock().await;

        let mut attempt = 0u32;
        loop {
            let mut game = self.load_game(game_id).await?;
            let expected = game.revision;

            let player = transitions::join_game(&mut game, name).map_err(|err| {
                warn!(%game_id, error = %err, "join rejected");
                err
            })?;

            match self
                .timed("update_game", self.store.update_game(game, expected))
                .await
            {
                Ok(_) => {
                    self.cache.invalidate_all();
                    info!(%game_id, player_id = %player.player_id, symbol = player.symbol.as_str(), "player joined");
                    return Ok(player);
                }
                Err(err) if self.should_retry(&err, &mut attempt) => {
                    warn!(%game_id, attempt, error = %err, "join commit failed, retrying");
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Validate and apply one move, returning the updated snapshot.
    pub async fn make_move(
        &self,
        game_id: Uuid,
        player_id: Uuid,
        cell: Cell,
    ) -> Result<GameSnapshot, DomainError> {
        let lock = self.game_lock(game_id);
        let _guard = lock.lock().await;

        let mut attempt = 0u32;
        loop {
            let mut game = self.load_game(game_id).await?;
            let expected = game.revision;

            // Status gate runs before player resolution; the distinction
            // between a paused game and an unknown player is observable.
            transitions::ensure_in_progress(&game).map_err(|err| {
                warn!(%game_id, error = %err, "move rejected");
                err
            })?;

            let player = self
                .timed("find_player", self.store.find_player(player_id))
                .await?
                .ok_or_else(|| {
                    warn!(%game_id, %player_id, "move by unknown player");
                    DomainError::not_found(
                        NotFoundKind::Player,
                        format!("player not found: {player_id}"),
                    )
                })?;

            transitions::apply_move(&mut game, &player, cell).map_err(|err| {
                warn!(%game_id, %player_id, error = %err, "move rejected");
                err
            })?;

            match self
                .timed("update_game", self.store.update_game(game, expected))
                .await
            {
                Ok(updated) => {
                    self.cache.invalidate_all();
                    match updated.status {
                        GameStatus::Finished => {
                            self.locks.remove(&game_id);
                            info!(%game_id, result = ?updated.result(), "game finished")
                        }
                        _ => debug!(%game_id, moves = updated.moves.len(), "move accepted"),
                    }
                    return Ok(snapshot::snapshot(&updated));
                }
                Err(err) if self.should_retry(&err, &mut attempt) => {
                    warn!(%game_id, attempt, error = %err, "move commit failed, retrying");
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Read one game's snapshot through the cache.
    pub async fn get(&self, game_id: Uuid) -> Result<GameSnapshot, DomainError> {
        self.cache
            .game(game_id, async {
                let game = self.load_game(game_id).await?;
                Ok(snapshot::snapshot(&game))
            })
            .await
    }

    /// List snapshots by status (all games when `None`) through the cache.
    pub async fn list(&self, status: Option<GameStatus>) -> Result<Vec<GameSnapshot>, DomainError> {
        let snapshots = self
            .cache
            .list(status, async {
                let games = self
                    .timed("list_games", self.store.list_games(status))
                    .await?;
                Ok(Arc::new(games.iter().map(snapshot::snapshot).collect()))
            })
            .await?;
        Ok(snapshots.as_ref().clone())
    }

    async fn load_game(&self, game_id: Uuid) -> Result<Game, DomainError> {
        self.timed("find_game", repos::require_game(self.store.as_ref(), game_id))
            .await
    }

    fn game_lock(&self, game_id: Uuid) -> Arc<Mutex<()>> {
        self.locks
            .entry(game_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Commit failures worth re-running the cycle for: a concurrent writer
    /// won the revision race, or the store call timed out. Bounded by
    /// `commit_retry_limit`; afterwards the error surfaces to the caller.
    fn should_retry(&self, err: &DomainError, attempt: &mut u32) -> bool {
        let retryable = matches!(
            err,
            DomainError::Conflict(ConflictKind::OptimisticLock, _)
                | DomainError::Infra(InfraErrorKind::Timeout, _)
        );
        if retryable && *attempt < self.config.commit_retry_limit {
            *attempt += 1;
            true
        } else {
            false
        }
    }

    /// Bound a store call by the configured deadline. The per-game critical
    /// section is never held across an unbounded wait.
    async fn timed<T, F>(&self, op: &'static str, fut: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        match timeout(self.config.store_timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(op, timeout_ms = self.config.store_timeout.as_millis() as u64, "store call exceeded deadline");
                Err(DomainError::infra(
                    InfraErrorKind::Timeout,
                    format!("{op} exceeded the store deadline"),
                ))
            }
        }
    }
}
