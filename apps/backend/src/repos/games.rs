//! Game aggregate and loaders for the domain layer.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::{games_sea, memberships_sea};
use crate::entities::games::{self, GameStatus};
use crate::entities::{game_players, game_prizes, game_results};
use crate::errors::domain::{DomainError, ValidationKind};

/// A player's membership in a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub player_id: i64,
    /// 1-based, in commit order of the joins.
    pub join_order: i32,
    pub is_ready: bool,
    pub joined_at: OffsetDateTime,
}

/// Game aggregate: the row plus its full participant list in join order.
///
/// Always loaded eagerly; the lifecycle engine never works on a partial view.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: i64,
    pub status: GameStatus,
    pub min_players: i32,
    pub participants: Vec<Participant>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub started_at: Option<OffsetDateTime>,
    pub finished_at: Option<OffsetDateTime>,
    pub version: i32,
}

impl Game {
    fn from_parts(game: games::Model, members: Vec<game_players::Model>) -> Self {
        Self {
            id: game.id,
            status: game.status,
            min_players: game.min_players,
            participants: members.into_iter().map(Participant::from).collect(),
            created_at: game.created_at,
            updated_at: game.updated_at,
            started_at: game.started_at,
            finished_at: game.finished_at,
            version: game.version,
        }
    }

    /// The first participant.
    pub fn owner(&self) -> Option<i64> {
        self.participants.first().map(|p| p.player_id)
    }

    pub fn participant(&self, player_id: i64) -> Option<&Participant> {
        self.participants.iter().find(|p| p.player_id == player_id)
    }

    pub fn has_participant(&self, player_id: i64) -> bool {
        self.participant(player_id).is_some()
    }

    pub fn participant_ids(&self) -> Vec<i64> {
        self.participants.iter().map(|p| p.player_id).collect()
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn ready_count(&self) -> usize {
        self.participants.iter().filter(|p| p.is_ready).count()
    }

    pub fn threshold_met(&self) -> bool {
        self.participants.len() >= self.min_players.max(1) as usize
    }

    /// Every current participant has asked to start.
    pub fn quorum_reached(&self) -> bool {
        !self.participants.is_empty() && self.ready_count() == self.participant_count()
    }

    /// A finish ranking must name every participant exactly once.
    pub fn validate_ranking(&self, ranking: &[i64]) -> Result<(), DomainError> {
        let mut ranked = ranking.to_vec();
        ranked.sort_unstable();
        let mut expected = self.participant_ids();
        expected.sort_unstable();

        if ranked != expected {
            return Err(DomainError::validation(
                ValidationKind::InvalidRanking,
                format!(
                    "Ranking must list each of the {} participants of game {} exactly once",
                    expected.len(),
                    self.id
                ),
            ));
        }
        Ok(())
    }
}

impl From<game_players::Model> for Participant {
    fn from(m: game_players::Model) -> Self {
        Self {
            player_id: m.player_id,
            join_order: m.join_order,
            is_ready: m.is_ready,
            joined_at: m.created_at,
        }
    }
}

/// Input for `GameStore::insert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewGame {
    pub owner: i64,
    pub min_players: u32,
}

/// Final ranking row of a finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub player_id: i64,
    /// 1 = winner.
    pub place: i16,
}

impl From<game_results::Model> for GameResult {
    fn from(m: game_results::Model) -> Self {
        Self {
            player_id: m.player_id,
            place: m.place,
        }
    }
}

/// Points awarded to whoever finishes at `place`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GamePrize {
    pub place: i16,
    pub prize: i64,
}

impl GamePrize {
    pub fn new(place: i16, prize: i64) -> Self {
        Self { place, prize }
    }
}

/// Places must be unique and 1-based; prizes are never negative.
pub fn validate_prizes(prizes: &[GamePrize]) -> Result<(), DomainError> {
    let mut places = std::collections::HashSet::new();
    for prize in prizes {
        if prize.place < 1 {
            return Err(DomainError::validation(
                ValidationKind::InvalidPrize,
                format!("Prize place must be at least 1, got {}", prize.place),
            ));
        }
        if prize.prize < 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidPrize,
                format!("Prize for place {} must not be negative", prize.place),
            ));
        }
        if !places.insert(prize.place) {
            return Err(DomainError::validation(
                ValidationKind::InvalidPrize,
                format!("Place {} has more than one prize", prize.place),
            ));
        }
    }
    Ok(())
}

impl From<game_prizes::Model> for GamePrize {
    fn from(m: game_prizes::Model) -> Self {
        Self {
            place: m.place,
            prize: m.prize,
        }
    }
}

// Free functions (generic) used inside and outside transactions

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<Game>, DomainError> {
    let Some(game) = games_sea::find_by_id(conn, game_id).await? else {
        return Ok(None);
    };
    let members = memberships_sea::find_all_by_game(conn, game_id).await?;
    Ok(Some(Game::from_parts(game, members)))
}

/// Find game by ID or return `NotFound(Game)`.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Game, DomainError> {
    find_by_id(conn, game_id)
        .await?
        .ok_or_else(|| DomainError::game_not_found(game_id))
}
