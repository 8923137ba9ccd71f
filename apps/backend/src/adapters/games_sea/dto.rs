//! DTOs for games_sea adapter.

use crate::entities::games::GameStatus;

/// DTO for creating a new game row.
#[derive(Debug, Clone)]
pub struct GameCreate {
    pub status: GameStatus,
    pub min_players: i32,
}

impl GameCreate {
    /// Initial status follows the threshold: a game that needs more than its
    /// owner starts Planned, otherwise it is immediately Waiting.
    pub fn for_threshold(min_players: i32) -> Self {
        let status = if min_players > 1 {
            GameStatus::Planned
        } else {
            GameStatus::Waiting
        };
        Self {
            status,
            min_players,
        }
    }
}

/// Compare-and-swap status transition.
#[derive(Debug, Clone, Copy)]
pub struct StatusAdvance {
    pub id: i64,
    pub from: GameStatus,
    pub to: GameStatus,
}
