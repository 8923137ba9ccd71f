//! Error codes for the gamehub API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in problem+json responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Caller identity missing, invalid or unknown
    Unauthenticated,
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Valid identity, not entitled to act on this game
    Forbidden,

    // Request Validation
    /// Invalid game ID provided
    InvalidGameId,
    /// Status transition that is not the next step of the lifecycle
    InvalidTransition,
    /// Finish ranking is not a permutation of the participants
    InvalidRanking,
    /// Prize table with duplicate or non-positive places
    InvalidPrize,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    GameNotFound,
    PlayerNotFound,
    NotFound,

    // Lifecycle conflicts
    AlreadyJoined,
    /// Join attempted on a started or finished game
    GameClosed,
    /// Start attempted before the player threshold was met
    NotReady,
    AlreadyStarted,
    AlreadyFinished,
    /// Administrative operation not legal in the current status
    InvalidState,
    /// Generic conflict (lost race, duplicate id)
    Conflict,

    // System Errors
    /// Storage failed or timed out; safe to retry with backoff
    StorageUnavailable,
    Internal,
    ConfigError,
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::Forbidden => "FORBIDDEN",

            Self::InvalidGameId => "INVALID_GAME_ID",
            Self::InvalidTransition => "INVALID_TRANSITION",
            Self::InvalidRanking => "INVALID_RANKING",
            Self::InvalidPrize => "INVALID_PRIZE",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::AlreadyJoined => "ALREADY_JOINED",
            Self::GameClosed => "GAME_CLOSED",
            Self::NotReady => "NOT_READY",
            Self::AlreadyStarted => "ALREADY_STARTED",
            Self::AlreadyFinished => "ALREADY_FINISHED",
            Self::InvalidState => "INVALID_STATE",
            Self::Conflict => "CONFLICT",

            Self::StorageUnavailable => "STORAGE_UNAVAILABLE",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
