//! Error codes for the tic-tac-toe backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP problem responses and WebSocket error envelopes.

use core::fmt;

/// Centralized error codes for the tic-tac-toe backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request validation
    /// Row or column outside the 3x3 board
    InvalidCell,
    /// General bad request error
    BadRequest,
    /// Unknown WebSocket action
    UnknownAction,

    // Resource not found
    /// Game not found
    GameNotFound,
    /// Player not found
    PlayerNotFound,

    // Business logic conflicts
    /// Game already has two players
    GameFull,
    /// Game is not in progress
    GameNotInProgress,
    /// Player belongs to a different game
    PlayerNotInGame,
    /// Not this player's turn
    NotYourTurn,
    /// Cell already occupied
    CellOccupied,
    /// Optimistic lock conflict
    OptimisticLock,

    // System errors
    /// Store call exceeded its deadline
    StoreTimeout,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidCell => "INVALID_CELL",
            Self::BadRequest => "BAD_REQUEST",
            Self::UnknownAction => "UNKNOWN_ACTION",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",

            Self::GameFull => "GAME_FULL",
            Self::GameNotInProgress => "GAME_NOT_IN_PROGRESS",
            Self::PlayerNotInGame => "PLAYER_NOT_IN_GAME",
            Self::NotYourTurn => "NOT_YOUR_TURN",
            Self::CellOccupied => "CELL_OCCUPIED",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",

            Self::StoreTimeout => "STORE_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
