//! Wire views of the game aggregate. Field names are camelCase to match
//! the protocol consumed by existing clients.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::state::{Game, GameStatus, Move, Player, Symbol};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub player_id: Uuid,
    pub name: String,
    pub symbol: Symbol,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveView {
    pub move_id: Uuid,
    pub player_id: Uuid,
    pub row: u8,
    pub col: u8,
    #[serde(with = "time::serde::rfc3339")]
    pub moved_at: OffsetDateTime,
}

/// The full observable state of a game at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub game_id: Uuid,
    pub status: GameStatus,
    pub next_turn: Option<Symbol>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub players: Vec<PlayerView>,
    pub moves: Vec<MoveView>,
    pub winner: Option<Symbol>,
    /// Derived: `None` unless finished, then winner symbol text or "DRAW".
    pub result: Option<String>,
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        Self {
            player_id: player.player_id,
            name: player.name.clone(),
            symbol: player.symbol,
            joined_at: player.joined_at,
        }
    }
}

impl From<&Move> for MoveView {
    fn from(mv: &Move) -> Self {
        Self {
            move_id: mv.move_id,
            player_id: mv.player_id,
            row: mv.cell.row(),
            col: mv.cell.col(),
            moved_at: mv.moved_at,
        }
    }
}

/// Produce the snapshot for a game aggregate.
pub fn snapshot(game: &Game) -> GameSnapshot {
    GameSnapshot {
        game_id: game.game_id,
        status: game.status,
        next_turn: game.next_turn,
        created_at: game.created_at,
        players: game.players.iter().map(PlayerView::from).collect(),
        moves: game.moves.iter().map(MoveView::from).collect(),
        winner: game.winner,
        result: game.result(),
    }
}
