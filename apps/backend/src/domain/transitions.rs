//! The game state machine: lifecycle transitions and move validation.
//!
//! All operations here are pure functions over a single game's snapshot;
//! they either mutate the aggregate in place and succeed, or reject with a
//! `DomainError` and leave it untouched. Persistence, locking and retries
//! belong to the session coordinator.

use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::rules;
use crate::domain::state::{
    Cell, Game, GameStatus, Move, Player, Symbol, BOARD_CELLS, MAX_PLAYERS,
};
use crate::errors::domain::{ConflictKind, DomainError};

/// Produce a fresh game: waiting for players, X to open, revision 0.
pub fn new_game() -> Game {
    Game {
        game_id: Uuid::new_v4(),
        status: GameStatus::Waiting,
        next_turn: Some(Symbol::X),
        winner: None,
        players: Vec::with_capacity(MAX_PLAYERS),
        moves: Vec::with_capacity(BOARD_CELLS),
        created_at: OffsetDateTime::now_utc(),
        revision: 0,
    }
}

/// Add a player to the game. The first joiner gets X, the second O; the
/// second join flips the game to in-progress. A full game rejects further
/// joins, which also covers finished games (capacity is checked first and a
/// finished two-player game is full).
///
/// Name content is not validated here; that is a transport concern.
pub fn join_game(game: &mut Game, name: &str) -> Result<Player, DomainError> {
    if game.players.len() >= MAX_PLAYERS {
        return Err(DomainError::conflict(
            ConflictKind::GameFull,
            "game already has two players",
        ));
    }

    let symbol = if game.players.is_empty() {
        Symbol::X
    } else {
        Symbol::O
    };

    let player = Player {
        player_id: Uuid::new_v4(),
        game_id: game.game_id,
        name: name.to_string(),
        symbol,
        joined_at: OffsetDateTime::now_utc(),
    };
    game.players.push(player.clone());

    if game.players.len() == MAX_PLAYERS {
        game.status = GameStatus::InProgress;
    }

    Ok(player)
}

/// Reject unless the game is accepting moves. Split out so the coordinator
/// can run this check before resolving the acting player, preserving the
/// documented validation order.
pub fn ensure_in_progress(game: &Game) -> Result<(), DomainError> {
    if game.status != GameStatus::InProgress {
        return Err(DomainError::conflict(
            ConflictKind::GameNotInProgress,
            format!("game is not in progress but {:?}", game.status),
        ));
    }
    Ok(())
}

/// Validate and apply one move. Validation order is observable:
/// game-not-in-progress, player-not-in-game, not-your-turn, cell-occupied.
/// On success the move is appended, the win evaluator runs, and the game
/// either finishes (win or 9th move) or flips the turn.
pub fn apply_move(game: &mut Game, player: &Player, cell: Cell) -> Result<(), DomainError> {
    ensure_in_progress(game)?;

    if player.game_id != game.game_id {
        return Err(DomainError::conflict(
            ConflictKind::PlayerNotInGame,
            format!("player {} is not in game {}", player.player_id, game.game_id),
        ));
    }

    if game.next_turn != Some(player.symbol) {
        return Err(DomainError::conflict(
            ConflictKind::NotYourTurn,
            format!("it is not {}'s turn", player.symbol.as_str()),
        ));
    }

    if game.cell_occupied(cell) {
        return Err(DomainError::conflict(
            ConflictKind::CellOccupied,
            format!("cell ({},{}) already occupied", cell.row(), cell.col()),
        ));
    }

    game.moves.push(Move {
        move_id: Uuid::new_v4(),
        game_id: game.game_id,
        player_id: player.player_id,
        symbol: player.symbol,
        cell,
        moved_at: OffsetDateTime::now_utc(),
    });

    if let Some(winner) = rules::evaluate(&game.moves) {
        game.status = GameStatus::Finished;
        game.winner = Some(winner);
        game.next_turn = None;
    } else if game.moves.len() == BOARD_CELLS {
        game.status = GameStatus::Finished;
        game.winner = None;
        game.next_turn = None;
    } else {
        game.next_turn = game.next_turn.map(Symbol::other);
    }

    Ok(())
}
