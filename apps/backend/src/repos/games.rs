//! Storage collaborator contract for the session coordinator.
//!
//! The coordinator loads a whole aggregate snapshot, mutates it through the
//! state machine, and persists it whole; there is no write-on-read and no
//! partial update. Implementations must honor compare-and-swap semantics on
//! `Game::revision`: `update_game` commits only if the stored revision still
//! equals `expected_revision`, and bumps it by one on success.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::state::{Game, GameStatus, Player};
use crate::errors::domain::{DomainError, NotFoundKind};

#[async_trait]
pub trait GameStore: Send + Sync {
    async fn find_game(&self, game_id: Uuid) -> Result<Option<Game>, DomainError>;

    /// Persist a freshly created game (revision 0).
    async fn insert_game(&self, game: Game) -> Result<(), DomainError>;

    /// Persist a mutated aggregate. Commits only if the stored revision
    /// still equals `expected_revision`; otherwise fails with
    /// `Conflict(OptimisticLock)`. Returns the stored game with its
    /// revision bumped.
    async fn update_game(&self, game: Game, expected_revision: i32) -> Result<Game, DomainError>;

    async fn find_player(&self, player_id: Uuid) -> Result<Option<Player>, DomainError>;

    /// Games filtered by status; `None` lists all.
    async fn list_games(&self, status: Option<GameStatus>) -> Result<Vec<Game>, DomainError>;
}

/// Find a game or convert `None` into a domain not-found error,
/// eliminating the repetitive `ok_or_else` pattern when a game must exist.
pub async fn require_game(store: &dyn GameStore, game_id: Uuid) -> Result<Game, DomainError> {
    store.find_game(game_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Game, format!("game not found: {game_id}"))
    })
}
