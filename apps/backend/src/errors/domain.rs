//! Domain-level error type used across services, repositories and adapters.
//!
//! This error type is HTTP- and DB-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! through `From<DomainError> for AppError`.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use super::ErrorCode;

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    /// A row that must exist inside a committed transaction is missing
    DataCorruption,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
    Player,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    AlreadyJoined,
    GameClosed,
    NotReady,
    AlreadyStarted,
    AlreadyFinished,
    InvalidState,
    DuplicateId,
    /// Lost a compare-and-swap against a concurrent writer
    LostRace,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    InvalidGameId,
    InvalidTransition,
    InvalidRanking,
    InvalidPrize,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation or business rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict with the current game state
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Caller identity missing, invalid or unknown
    Unauthenticated(String),
    /// Valid identity, not entitled to act on the game
    Forbidden(String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Unauthenticated(d) => write!(f, "unauthenticated: {d}"),
            DomainError::Forbidden(d) => write!(f, "forbidden: {d}"),
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
    pub fn unauthenticated(detail: impl Into<String>) -> Self {
        Self::Unauthenticated(detail.into())
    }
    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::Forbidden(detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    pub fn game_not_found(game_id: i64) -> Self {
        Self::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
    }

    /// True when a caller may retry the same request later with backoff.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DomainError::Infra(InfraErrorKind::Timeout | InfraErrorKind::DbUnavailable, _)
                | DomainError::Infra(InfraErrorKind::Other(_), _)
        )
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Validation(kind, _) => match kind {
                ValidationKind::InvalidGameId => ErrorCode::InvalidGameId,
                ValidationKind::InvalidTransition => ErrorCode::InvalidTransition,
                ValidationKind::InvalidRanking => ErrorCode::InvalidRanking,
                ValidationKind::InvalidPrize => ErrorCode::InvalidPrize,
                ValidationKind::Other(_) => ErrorCode::ValidationError,
            },
            DomainError::Conflict(kind, _) => match kind {
                ConflictKind::AlreadyJoined => ErrorCode::AlreadyJoined,
                ConflictKind::GameClosed => ErrorCode::GameClosed,
                ConflictKind::NotReady => ErrorCode::NotReady,
                ConflictKind::AlreadyStarted => ErrorCode::AlreadyStarted,
                ConflictKind::AlreadyFinished => ErrorCode::AlreadyFinished,
                ConflictKind::InvalidState => ErrorCode::InvalidState,
                ConflictKind::DuplicateId | ConflictKind::LostRace | ConflictKind::Other(_) => {
                    ErrorCode::Conflict
                }
            },
            DomainError::NotFound(kind, _) => match kind {
                NotFoundKind::Game => ErrorCode::GameNotFound,
                NotFoundKind::Player => ErrorCode::PlayerNotFound,
                NotFoundKind::Other(_) => ErrorCode::NotFound,
            },
            DomainError::Unauthenticated(_) => ErrorCode::Unauthenticated,
            DomainError::Forbidden(_) => ErrorCode::Forbidden,
            DomainError::Infra(InfraErrorKind::DataCorruption, _) => ErrorCode::DataCorruption,
            DomainError::Infra(_, _) => ErrorCode::StorageUnavailable,
        }
    }
}
