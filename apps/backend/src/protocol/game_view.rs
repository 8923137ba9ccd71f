use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::entities::games::GameStatus;
use crate::repos::games::{Game, Participant};
use crate::services::lifecycle::StartOutcome;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantView {
    pub player_id: i64,
    pub join_order: i32,
    pub ready: bool,
}

impl From<&Participant> for ParticipantView {
    fn from(p: &Participant) -> Self {
        Self {
            player_id: p.player_id,
            join_order: p.join_order,
            ready: p.is_ready,
        }
    }
}

/// Public view of a game. Participants are listed in join order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub id: i64,
    pub status: GameStatus,
    pub owner: Option<i64>,
    pub min_players: i32,
    pub participants: Vec<ParticipantView>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub started_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub finished_at: Option<OffsetDateTime>,
    pub version: i32,
}

impl From<&Game> for GameView {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id,
            status: game.status,
            owner: game.owner(),
            min_players: game.min_players,
            participants: game.participants.iter().map(ParticipantView::from).collect(),
            created_at: game.created_at,
            started_at: game.started_at,
            finished_at: game.finished_at,
            version: game.version,
        }
    }
}

impl From<Game> for GameView {
    fn from(game: Game) -> Self {
        Self::from(&game)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartViewOutcome {
    Acknowledged,
    Started,
}

/// Response body of a start request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartView {
    pub outcome: StartViewOutcome,
    pub game: GameView,
}

impl From<StartOutcome> for StartView {
    fn from(outcome: StartOutcome) -> Self {
        let kind = if outcome.started() {
            StartViewOutcome::Started
        } else {
            StartViewOutcome::Acknowledged
        };
        Self {
            outcome: kind,
            game: GameView::from(outcome.into_game()),
        }
    }
}
