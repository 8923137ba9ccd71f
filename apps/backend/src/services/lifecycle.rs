//! Game session lifecycle engine.
//!
//! Orchestrates create/join/start/finish on top of [`GameStore`]. All
//! cross-request coordination lives in the store's transactional operations;
//! the engine holds no locks and keeps no per-game state in memory, so any
//! number of engines (threads or processes) may serve the same game.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::lifecycle::LifecycleConfig;
use crate::entities::games::GameStatus;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::repos::game_store::GameStore;
use crate::repos::games::{validate_prizes, Game, GamePrize, GameResult, NewGame};
use crate::repos::players::PlayerDirectory;

/// What a successful `request_start` did.
#[derive(Debug, Clone, PartialEq)]
pub enum StartOutcome {
    /// Ready recorded; the game is still waiting on other participants.
    Acknowledged(Game),
    /// This call completed the quorum and flipped the game to Started.
    Started(Game),
}

impl StartOutcome {
    pub fn game(&self) -> &Game {
        match self {
            StartOutcome::Acknowledged(game) | StartOutcome::Started(game) => game,
        }
    }

    pub fn into_game(self) -> Game {
        match self {
            StartOutcome::Acknowledged(game) | StartOutcome::Started(game) => game,
        }
    }

    pub fn started(&self) -> bool {
        matches!(self, StartOutcome::Started(_))
    }
}

#[derive(Clone)]
pub struct GameLifecycle {
    games: Arc<dyn GameStore>,
    players: Arc<dyn PlayerDirectory>,
    config: LifecycleConfig,
}

impl GameLifecycle {
    pub fn new(
        games: Arc<dyn GameStore>,
        players: Arc<dyn PlayerDirectory>,
        config: LifecycleConfig,
    ) -> Self {
        Self {
            games,
            players,
            config,
        }
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// Run one storage call under the configured timeout.
    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        match tokio::time::timeout(self.config.storage_timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    op,
                    timeout_ms = self.config.storage_timeout.as_millis() as u64,
                    "Storage call timed out"
                );
                Err(DomainError::infra(
                    InfraErrorKind::Timeout,
                    format!("Storage call '{op}' timed out"),
                ))
            }
        }
    }

    async fn ensure_player(&self, player_id: i64) -> Result<(), DomainError> {
        if self
            .bounded("player_exists", self.players.exists(player_id))
            .await?
        {
            Ok(())
        } else {
            debug!(player_id, "Unknown caller");
            Err(DomainError::unauthenticated(format!(
                "Player {player_id} is not registered"
            )))
        }
    }

    async fn load(&self, game_id: i64) -> Result<Game, DomainError> {
        self.bounded("find_game", self.games.find_by_id(game_id))
            .await?
            .ok_or_else(|| DomainError::game_not_found(game_id))
    }

    /// Create a game owned by `player_id`, its sole participant.
    pub async fn create_game(&self, player_id: i64) -> Result<Game, DomainError> {
        self.ensure_player(player_id).await?;

        let game = self
            .bounded(
                "insert_game",
                self.games.insert(NewGame {
                    owner: player_id,
                    min_players: self.config.min_players,
                }),
            )
            .await?;

        info!(
            game_id = game.id,
            player_id,
            status = ?game.status,
            min_players = game.min_players,
            "Game created"
        );
        Ok(game)
    }

    /// Append `player_id` to the game. Planned games move to Waiting once the
    /// threshold is met, in the same transaction as the append.
    pub async fn join_game(&self, player_id: i64, game_id: i64) -> Result<Game, DomainError> {
        self.ensure_player(player_id).await?;
        let game = self.load(game_id).await?;

        // Status before membership, matching the order the store re-checks in.
        if !game.status.accepts_joins() {
            debug!(game_id, player_id, status = ?game.status, "Join rejected: game closed");
            return Err(closed(game_id, game.status));
        }
        if game.has_participant(player_id) {
            debug!(game_id, player_id, "Join rejected: already a participant");
            return Err(DomainError::conflict(
                ConflictKind::AlreadyJoined,
                format!("Player {player_id} already joined game {game_id}"),
            ));
        }

        let game = self
            .bounded(
                "append_participant",
                self.games.append_participant(game_id, player_id),
            )
            .await
            .map_err(|e| player_missing_is_unauthenticated(e, player_id))?;

        info!(
            game_id,
            player_id,
            status = ?game.status,
            participants = game.participant_count(),
            "Player joined game"
        );
        Ok(game)
    }

    /// Record that `player_id` is ready to start; the call whose ready-ack
    /// completes the quorum performs the single Waiting -> Started transition.
    pub async fn request_start(
        &self,
        player_id: i64,
        game_id: i64,
    ) -> Result<StartOutcome, DomainError> {
        self.ensure_player(player_id).await?;
        let game = self.load(game_id).await?;

        if !game.has_participant(player_id) {
            debug!(game_id, player_id, "Start rejected: not a participant");
            return Err(DomainError::forbidden(format!(
                "Player {player_id} is not a participant of game {game_id}"
            )));
        }
        start_gate(game_id, game.status)?;

        let game = self
            .bounded("record_ready", self.games.record_ready(game_id, player_id))
            .await?;
        // Status moved between the read above and the ready write.
        start_gate(game_id, game.status)?;

        info!(
            game_id,
            player_id,
            ready = game.ready_count(),
            participants = game.participant_count(),
            "Ready recorded"
        );

        if !game.quorum_reached() {
            return Ok(StartOutcome::Acknowledged(game));
        }

        let swapped = self
            .bounded(
                "advance_status",
                self.games
                    .try_advance_status(game_id, GameStatus::Waiting, GameStatus::Started),
            )
            .await?;

        // One re-read after the CAS, win or lose.
        let game = self.load(game_id).await?;
        if swapped {
            info!(game_id, player_id, participants = game.participant_count(), "Game started");
            Ok(StartOutcome::Started(game))
        } else {
            debug!(game_id, player_id, status = ?game.status, "Lost start CAS; acknowledging ready");
            Ok(StartOutcome::Acknowledged(game))
        }
    }

    /// Read-only view of a game.
    pub async fn find_game(&self, player_id: i64, game_id: i64) -> Result<Game, DomainError> {
        self.ensure_player(player_id).await?;
        self.load(game_id).await
    }

    /// Administrative: Started -> Finished with results in `ranking` order
    /// (first = winner) and prizes credited as points.
    pub async fn finish_game(&self, game_id: i64, ranking: Vec<i64>) -> Result<Game, DomainError> {
        let game = self.load(game_id).await?;
        if game.status != GameStatus::Started {
            debug!(game_id, status = ?game.status, "Finish rejected");
            return Err(invalid_state(game_id, game.status, "finish"));
        }
        game.validate_ranking(&ranking)?;

        let finished = self
            .bounded("finish_game", self.games.finish(game_id, ranking))
            .await?;
        let game = self.load(game_id).await?;
        if !finished {
            debug!(game_id, status = ?game.status, "Finish lost to a concurrent writer");
            return Err(invalid_state(game_id, game.status, "finish"));
        }

        info!(game_id, participants = game.participant_count(), "Game finished");
        Ok(game)
    }

    /// Administrative: replace the prize table before the game starts.
    pub async fn configure_prizes(
        &self,
        game_id: i64,
        prizes: Vec<GamePrize>,
    ) -> Result<Vec<GamePrize>, DomainError> {
        validate_prizes(&prizes)?;
        let game = self.load(game_id).await?;
        if !game.status.accepts_joins() {
            return Err(invalid_state(game_id, game.status, "configure prizes for"));
        }

        let stored = self
            .bounded("replace_prizes", self.games.replace_prizes(game_id, prizes))
            .await?;
        info!(game_id, places = stored.len(), "Prizes configured");
        Ok(stored)
    }

    pub async fn game_prizes(&self, game_id: i64) -> Result<Vec<GamePrize>, DomainError> {
        self.load(game_id).await?;
        self.bounded("find_prizes", self.games.find_prizes(game_id))
            .await
    }

    pub async fn game_results(&self, game_id: i64) -> Result<Vec<GameResult>, DomainError> {
        self.load(game_id).await?;
        self.bounded("find_results", self.games.find_results(game_id))
            .await
    }
}

/// RequestStart is only legal while Waiting.
fn start_gate(game_id: i64, status: GameStatus) -> Result<(), DomainError> {
    let (kind, detail) = match status {
        GameStatus::Waiting => return Ok(()),
        GameStatus::Planned => (ConflictKind::NotReady, "has not reached its player threshold"),
        GameStatus::Started => (ConflictKind::AlreadyStarted, "has already started"),
        GameStatus::Finished => (ConflictKind::AlreadyFinished, "has already finished"),
    };
    Err(DomainError::conflict(kind, format!("Game {game_id} {detail}")))
}

fn closed(game_id: i64, status: GameStatus) -> DomainError {
    DomainError::conflict(
        ConflictKind::GameClosed,
        format!("Game {game_id} is {} and no longer accepts players", status.as_str()),
    )
}

fn invalid_state(game_id: i64, status: GameStatus, action: &str) -> DomainError {
    DomainError::conflict(
        ConflictKind::InvalidState,
        format!("Cannot {action} game {game_id} while it is {}", status.as_str()),
    )
}

/// The caller was verified up front, so a dangling player reference at append
/// time means the player went away in between.
fn player_missing_is_unauthenticated(err: DomainError, player_id: i64) -> DomainError {
    match err {
        DomainError::NotFound(NotFoundKind::Player, _) => {
            DomainError::unauthenticated(format!("Player {player_id} is not registered"))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_gate_maps_every_status() {
        assert!(start_gate(1, GameStatus::Waiting).is_ok());
        let code = |s| start_gate(1, s).unwrap_err().code();
        assert_eq!(code(GameStatus::Planned), crate::errors::ErrorCode::NotReady);
        assert_eq!(code(GameStatus::Started), crate::errors::ErrorCode::AlreadyStarted);
        assert_eq!(code(GameStatus::Finished), crate::errors::ErrorCode::AlreadyFinished);
    }

    #[test]
    fn dangling_player_becomes_unauthenticated() {
        let err = player_missing_is_unauthenticated(
            DomainError::not_found(NotFoundKind::Player, "gone"),
            9,
        );
        assert!(matches!(err, DomainError::Unauthenticated(_)));

        let err = player_missing_is_unauthenticated(DomainError::game_not_found(1), 9);
        assert!(matches!(err, DomainError::NotFound(NotFoundKind::Game, _)));
    }
}
