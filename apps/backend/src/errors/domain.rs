//! Domain-level error type used across the engine, services and adapters.
//!
//! This error type is HTTP-agnostic. Handlers should return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::errors::ErrorCode;

/// Infra error kinds to distinguish operational failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    /// A store or cache call exceeded its deadline.
    Timeout,
}

/// Request validation kinds caught at the transport boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Row or column outside the 3x3 board.
    InvalidCell,
}

/// Domain-level not found entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
    Player,
}

/// Domain-level conflict kinds. All join/move rejections live here:
/// they are expected business outcomes, not defects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// Game already has two players.
    GameFull,
    /// Move attempted while the game is not in progress.
    GameNotInProgress,
    /// Acting player belongs to a different game.
    PlayerNotInGame,
    /// Move attempted out of turn.
    NotYourTurn,
    /// Target cell already holds a move.
    CellOccupied,
    /// Concurrent writer committed first (revision mismatch).
    OptimisticLock,
}

/// Central domain error type.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation failure (transport boundary).
    Validation(ValidationKind, String),
    /// Semantic conflict; the game state rejected the operation.
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms.
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failure.
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// Stable machine-readable code for this error, shared by the HTTP
    /// problem responses and the WebSocket error envelopes.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Validation(ValidationKind::InvalidCell, _) => ErrorCode::InvalidCell,
            DomainError::Conflict(ConflictKind::GameFull, _) => ErrorCode::GameFull,
            DomainError::Conflict(ConflictKind::GameNotInProgress, _) => {
                ErrorCode::GameNotInProgress
            }
            DomainError::Conflict(ConflictKind::PlayerNotInGame, _) => ErrorCode::PlayerNotInGame,
            DomainError::Conflict(ConflictKind::NotYourTurn, _) => ErrorCode::NotYourTurn,
            DomainError::Conflict(ConflictKind::CellOccupied, _) => ErrorCode::CellOccupied,
            DomainError::Conflict(ConflictKind::OptimisticLock, _) => ErrorCode::OptimisticLock,
            DomainError::NotFound(NotFoundKind::Game, _) => ErrorCode::GameNotFound,
            DomainError::NotFound(NotFoundKind::Player, _) => ErrorCode::PlayerNotFound,
            DomainError::Infra(InfraErrorKind::Timeout, _) => ErrorCode::StoreTimeout,
        }
    }
}
