use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::errors::domain::{DomainError, ValidationKind};

/// Maximum players per game; symbols are assigned X to the first
/// joiner, O to the second.
pub const MAX_PLAYERS: usize = 2;

/// A full board holds exactly 9 moves.
pub const BOARD_CELLS: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    /// The symbol that plays after this one.
    pub fn other(self) -> Symbol {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Symbol::X => "X",
            Symbol::O => "O",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    Waiting,
    InProgress,
    Finished,
}

/// A board position with row and col in [0,2]. The constructor enforces
/// bounds, so the state machine never observes an out-of-range coordinate;
/// transports reject bad coordinates before the engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    row: u8,
    col: u8,
}

impl Cell {
    pub fn new(row: u8, col: u8) -> Result<Self, DomainError> {
        if row > 2 || col > 2 {
            return Err(DomainError::validation(
                ValidationKind::InvalidCell,
                format!("cell ({row},{col}) outside the 3x3 board"),
            ));
        }
        Ok(Self { row, col })
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }
}

/// A recorded move. Created once, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Move {
    pub move_id: Uuid,
    pub game_id: Uuid,
    pub player_id: Uuid,
    pub symbol: Symbol,
    pub cell: Cell,
    pub moved_at: OffsetDateTime,
}

/// A joined player. Created once, never mutated. `game_id` is a lookup
/// back-reference, not ownership.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub player_id: Uuid,
    pub game_id: Uuid,
    pub name: String,
    pub symbol: Symbol,
    pub joined_at: OffsetDateTime,
}

/// The game aggregate: the only shared mutable resource in the system.
/// Owned exclusively by the session coordinator for the duration of one
/// operation; persisted whole.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub game_id: Uuid,
    pub status: GameStatus,
    /// Whose turn it is; `None` iff the game is finished.
    pub next_turn: Option<Symbol>,
    /// `None` with status Finished means a draw.
    pub winner: Option<Symbol>,
    /// Join order; at most [`MAX_PLAYERS`].
    pub players: Vec<Player>,
    /// Insertion order is play order. Moves only accumulate.
    pub moves: Vec<Move>,
    pub created_at: OffsetDateTime,
    /// Monotonic counter used as the compare-and-swap token on persistence.
    pub revision: i32,
}

impl Game {
    /// Derived outcome text: `None` unless finished, then the winner's
    /// symbol or the literal draw marker.
    pub fn result(&self) -> Option<String> {
        if self.status != GameStatus::Finished {
            return None;
        }
        Some(match self.winner {
            Some(symbol) => symbol.as_str().to_string(),
            None => "DRAW".to_string(),
        })
    }

    pub fn player(&self, player_id: Uuid) -> Option<&Player> {
        self.players.iter().find(|p| p.player_id == player_id)
    }

    pub fn cell_occupied(&self, cell: Cell) -> bool {
        self.moves.iter().any(|m| m.cell == cell)
    }
}
