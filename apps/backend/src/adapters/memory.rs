//! Process-local `GameStore` backed by DashMap.
//!
//! Durable storage is an external concern; this adapter is the reference
//! implementation of the contract, including the compare-and-swap commit
//! gate. The revision check and replacement happen while holding the shard
//! guard for the game entry, so concurrent writers cannot interleave.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::state::{Game, GameStatus, Player};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::GameStore;

#[derive(Default)]
pub struct InMemoryStore {
    games: DashMap<Uuid, Game>,
    /// Players are immutable once created; this index answers
    /// `find_player` without scanning every game.
    players: DashMap<Uuid, Player>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            games: DashMap::new(),
            players: DashMap::new(),
        }
    }
}

#[async_trait]
impl GameStore for InMemoryStore {
    async fn find_game(&self, game_id: Uuid) -> Result<Option<Game>, DomainError> {
        Ok(self.games.get(&game_id).map(|entry| entry.value().clone()))
    }

    async fn insert_game(&self, game: Game) -> Result<(), DomainError> {
        self.games.insert(game.game_id, game);
        Ok(())
    }

    async fn update_game(&self, game: Game, expected_revision: i32) -> Result<Game, DomainError> {
        let mut entry = self.games.get_mut(&game.game_id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Game, format!("game not found: {}", game.game_id))
        })?;

        if entry.revision != expected_revision {
            return Err(DomainError::conflict(
                ConflictKind::OptimisticLock,
                format!(
                    "game revision mismatch: expected {expected_revision}, stored {}",
                    entry.revision
                ),
            ));
        }

        let mut updated = game;
        updated.revision = expected_revision + 1;
        for player in &updated.players {
            self.players
                .entry(player.player_id)
                .or_insert_with(|| player.clone());
        }
        *entry = updated.clone();
        Ok(updated)
    }

    async fn find_player(&self, player_id: Uuid) -> Result<Option<Player>, DomainError> {
        Ok(self
            .players
            .get(&player_id)
            .map(|entry| entry.value().clone()))
    }

    async fn list_games(&self, status: Option<GameStatus>) -> Result<Vec<Game>, DomainError> {
        let mut games: Vec<Game> = self
            .games
            .iter()
            .filter(|entry| status.map_or(true, |s| entry.value().status == s))
            .map(|entry| entry.value().clone())
            .collect();
        games.sort_by_key(|g| (g.created_at, g.game_id));
        Ok(games)
    }
}
