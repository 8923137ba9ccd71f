//! Transactional game repository consumed by the lifecycle engine.
//!
//! Every method runs in exactly one database transaction. Methods that mutate a
//! game first bump its `version` with a status filter (`touch_if_status`), which
//! both re-checks the status and, on Postgres, takes the row lock that
//! serializes concurrent mutations of the same game across processes. All
//! membership and ready checks happen after that lock, inside the same
//! transaction, so the engine's own pre-checks are advisory only.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection};
use tracing::debug;

use crate::adapters::games_sea::{self, GameCreate, StatusAdvance};
use crate::adapters::memberships_sea::{self, MembershipCreate};
use crate::adapters::{players_sea, results_sea};
use crate::db::txn::with_txn;
use crate::entities::games::GameStatus;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, ValidationKind};
use crate::repos::games::{self as games_repo, Game, GamePrize, GameResult, NewGame};

const JOINABLE: [GameStatus; 2] = [GameStatus::Planned, GameStatus::Waiting];

#[async_trait]
pub trait GameStore: Send + Sync {
    /// Create a game with `owner` as its sole participant. Initial status is
    /// Planned when more than one player is required, Waiting otherwise.
    async fn insert(&self, game: NewGame) -> Result<Game, DomainError>;

    /// Load the aggregate with its full participant list.
    async fn find_by_id(&self, game_id: i64) -> Result<Option<Game>, DomainError>;

    /// Append `player_id` in join order, advancing Planned -> Waiting when the
    /// game's threshold is met.
    ///
    /// Errors: `NotFound` (game), `Conflict(GameClosed)` when the game no longer
    /// accepts joins, `Conflict(AlreadyJoined)`, `NotFound(Player)` for an
    /// unknown player.
    async fn append_participant(&self, game_id: i64, player_id: i64) -> Result<Game, DomainError>;

    /// Mark `player_id` ready while the game is Waiting and return the refreshed
    /// aggregate. In any other status nothing is written and the current
    /// aggregate is returned for the caller to interpret. A participant who is
    /// already ready gets the current aggregate back without a write.
    ///
    /// Errors: `NotFound` (game), `Forbidden` when the player is not a participant.
    async fn record_ready(&self, game_id: i64, player_id: i64) -> Result<Game, DomainError>;

    /// Compare-and-swap the status `from -> to`. `Ok(false)` when the persisted
    /// status is not `from` or the transition guard does not hold; nothing is
    /// written in that case.
    ///
    /// Guards: entering Waiting needs `min_players` participants, entering
    /// Started needs every participant ready, entering Finished needs one result
    /// per participant.
    async fn try_advance_status(
        &self,
        game_id: i64,
        from: GameStatus,
        to: GameStatus,
    ) -> Result<bool, DomainError>;

    /// Started -> Finished together with one result per ranked player and the
    /// configured prizes credited as points. `Ok(false)` when the game was not
    /// Started.
    async fn finish(&self, game_id: i64, ranking: Vec<i64>) -> Result<bool, DomainError>;

    /// Replace the prize table while the game is Planned or Waiting.
    async fn replace_prizes(
        &self,
        game_id: i64,
        prizes: Vec<GamePrize>,
    ) -> Result<Vec<GamePrize>, DomainError>;

    async fn find_prizes(&self, game_id: i64) -> Result<Vec<GamePrize>, DomainError>;

    async fn find_results(&self, game_id: i64) -> Result<Vec<GameResult>, DomainError>;
}

/// `GameStore` backed by SeaORM.
#[derive(Debug, Clone)]
pub struct SeaGameStore {
    db: DatabaseConnection,
}

impl SeaGameStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Re-read a game the current transaction has just written.
async fn reload<C: ConnectionTrait + Send + Sync>(conn: &C, game_id: i64) -> Result<Game, DomainError> {
    games_repo::find_by_id(conn, game_id).await?.ok_or_else(|| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("Game {game_id} vanished inside its own transaction"),
        )
    })
}

/// Explain why a status-filtered touch matched no row.
async fn rejection<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    kind: ConflictKind,
    action: &str,
) -> DomainError {
    match games_sea::find_by_id(conn, game_id).await {
        Ok(Some(game)) => DomainError::conflict(
            kind,
            format!("Cannot {action} game {game_id}: it is {}", game.status.as_str()),
        ),
        Ok(None) => DomainError::game_not_found(game_id),
        Err(e) => e.into(),
    }
}

fn lost_race(game_id: i64, detail: &str) -> DomainError {
    DomainError::conflict(ConflictKind::LostRace, format!("Game {game_id}: {detail}"))
}

#[async_trait]
impl GameStore for SeaGameStore {
    async fn insert(&self, new_game: NewGame) -> Result<Game, DomainError> {
        let min_players = i32::try_from(new_game.min_players).map_err(|_| {
            DomainError::validation(
                ValidationKind::Other("MinPlayers".into()),
                format!("min_players {} is out of range", new_game.min_players),
            )
        })?;
        let owner = new_game.owner;

        with_txn(&self.db, move |txn| {
            Box::pin(async move {
                let row = games_sea::create_game(txn, GameCreate::for_threshold(min_players)).await?;
                memberships_sea::create_membership(txn, MembershipCreate::new(row.id, owner, 1))
                    .await?;
                reload(txn, row.id).await
            })
        })
        .await
    }

    async fn find_by_id(&self, game_id: i64) -> Result<Option<Game>, DomainError> {
        games_repo::find_by_id(&self.db, game_id).await
    }

    async fn append_participant(&self, game_id: i64, player_id: i64) -> Result<Game, DomainError> {
        with_txn(&self.db, move |txn| {
            Box::pin(async move {
                if !games_sea::touch_if_status(txn, game_id, &JOINABLE).await? {
                    return Err(rejection(txn, game_id, ConflictKind::GameClosed, "join").await);
                }

                if memberships_sea::find_membership(txn, game_id, player_id)
                    .await?
                    .is_some()
                {
                    return Err(DomainError::conflict(
                        ConflictKind::AlreadyJoined,
                        format!("Player {player_id} already joined game {game_id}"),
                    ));
                }

                let count = memberships_sea::count_by_game(txn, game_id).await?;
                let join_order = i32::try_from(count + 1).map_err(|_| {
                    DomainError::infra(
                        InfraErrorKind::DataCorruption,
                        format!("Game {game_id} has {count} participants"),
                    )
                })?;
                memberships_sea::create_membership(
                    txn,
                    MembershipCreate::new(game_id, player_id, join_order),
                )
                .await?;

                let row = games_sea::require_game(txn, game_id).await?;
                if row.status == GameStatus::Planned && join_order >= row.min_players {
                    games_sea::advance_status(
                        txn,
                        StatusAdvance {
                            id: game_id,
                            from: GameStatus::Planned,
                            to: GameStatus::Waiting,
                        },
                    )
                    .await?;
                }

                reload(txn, game_id).await
            })
        })
        .await
    }

    async fn record_ready(&self, game_id: i64, player_id: i64) -> Result<Game, DomainError> {
        with_txn(&self.db, move |txn| {
            Box::pin(async move {
                let game = games_repo::require_game(txn, game_id).await?;
                if game.status != GameStatus::Waiting {
                    return Ok(game);
                }
                match game.participant(player_id) {
                    None => {
                        return Err(DomainError::forbidden(format!(
                            "Player {player_id} is not a participant of game {game_id}"
                        )));
                    }
                    // Ready flags never reset, so a repeat ack has nothing to write.
                    Some(p) if p.is_ready => return Ok(game),
                    Some(_) => {}
                }

                if !games_sea::touch_if_status(txn, game_id, &[GameStatus::Waiting]).await? {
                    return games_repo::require_game(txn, game_id).await;
                }
                memberships_sea::set_ready(txn, game_id, player_id).await?;
                reload(txn, game_id).await
            })
        })
        .await
    }

    async fn try_advance_status(
        &self,
        game_id: i64,
        from: GameStatus,
        to: GameStatus,
    ) -> Result<bool, DomainError> {
        if from.next() != Some(to) {
            return Err(DomainError::validation(
                ValidationKind::InvalidTransition,
                format!("{} -> {} is not a forward step", from.as_str(), to.as_str()),
            ));
        }

        let outcome = with_txn(&self.db, move |txn| {
            Box::pin(async move {
                let swapped =
                    games_sea::advance_status(txn, StatusAdvance { id: game_id, from, to }).await?;
                if !swapped {
                    if games_sea::find_by_id(txn, game_id).await?.is_none() {
                        return Err(DomainError::game_not_found(game_id));
                    }
                    return Ok(false);
                }

                let game = reload(txn, game_id).await?;
                let guard_holds = match to {
                    GameStatus::Waiting => game.threshold_met(),
                    GameStatus::Started => game.quorum_reached(),
                    GameStatus::Finished => {
                        let results = results_sea::find_results(txn, game_id).await?;
                        results.len() == game.participant_count()
                    }
                    GameStatus::Planned => false,
                };
                if !guard_holds {
                    // Roll back the swap.
                    return Err(lost_race(game_id, "transition guard no longer holds"));
                }
                Ok(true)
            })
        })
        .await;

        match outcome {
            Err(DomainError::Conflict(ConflictKind::LostRace, detail)) => {
                debug!(game_id, from = from.as_str(), to = to.as_str(), %detail, "Status CAS rolled back");
                Ok(false)
            }
            other => other,
        }
    }

    async fn finish(&self, game_id: i64, ranking: Vec<i64>) -> Result<bool, DomainError> {
        with_txn(&self.db, move |txn| {
            Box::pin(async move {
                let swapped = games_sea::advance_status(
                    txn,
                    StatusAdvance {
                        id: game_id,
                        from: GameStatus::Started,
                        to: GameStatus::Finished,
                    },
                )
                .await?;
                if !swapped {
                    if games_sea::find_by_id(txn, game_id).await?.is_none() {
                        return Err(DomainError::game_not_found(game_id));
                    }
                    return Ok(false);
                }

                // Participants cannot change once Started, but validate under the lock anyway
                // so a bad ranking rolls the status back with it.
                let game = reload(txn, game_id).await?;
                game.validate_ranking(&ranking)?;

                let prizes: Vec<GamePrize> = results_sea::find_prizes(txn, game_id)
                    .await?
                    .into_iter()
                    .map(GamePrize::from)
                    .collect();

                for (idx, player_id) in ranking.iter().copied().enumerate() {
                    let place = i16::try_from(idx + 1).map_err(|_| {
                        DomainError::validation(
                            ValidationKind::InvalidRanking,
                            "Ranking has too many places",
                        )
                    })?;
                    results_sea::insert_result(txn, game_id, player_id, place).await?;

                    if let Some(prize) = prizes.iter().find(|p| p.place == place) {
                        if prize.prize > 0 {
                            players_sea::add_points(txn, player_id, prize.prize).await?;
                        }
                    }
                }
                Ok(true)
            })
        })
        .await
    }

    async fn replace_prizes(
        &self,
        game_id: i64,
        prizes: Vec<GamePrize>,
    ) -> Result<Vec<GamePrize>, DomainError> {
        with_txn(&self.db, move |txn| {
            Box::pin(async move {
                if !games_sea::touch_if_status(txn, game_id, &JOINABLE).await? {
                    return Err(rejection(
                        txn,
                        game_id,
                        ConflictKind::InvalidState,
                        "configure prizes for",
                    )
                    .await);
                }

                let pairs: Vec<(i16, i64)> = prizes.iter().map(|p| (p.place, p.prize)).collect();
                let stored = results_sea::replace_prizes(txn, game_id, &pairs).await?;
                Ok(stored.into_iter().map(GamePrize::from).collect())
            })
        })
        .await
    }

    async fn find_prizes(&self, game_id: i64) -> Result<Vec<GamePrize>, DomainError> {
        let prizes = results_sea::find_prizes(&self.db, game_id).await?;
        Ok(prizes.into_iter().map(GamePrize::from).collect())
    }

    async fn find_results(&self, game_id: i64) -> Result<Vec<GameResult>, DomainError> {
        let results = results_sea::find_results(&self.db, game_id).await?;
        Ok(results.into_iter().map(GameResult::from).collect())
    }
}
