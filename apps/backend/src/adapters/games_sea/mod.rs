//! SeaORM adapter for games - generic over ConnectionTrait.
//!
//! `advance_status` is the only function in the crate that writes `games.status`
//! after creation.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set,
};

use crate::entities::games::{self, GameStatus};

pub mod dto;

pub use dto::{GameCreate, StatusAdvance};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find_by_id(game_id).one(conn).await
}

/// Find game by ID or return RecordNotFound error.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<games::Model, sea_orm::DbErr> {
    find_by_id(conn, game_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("Game {game_id} not found")))
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let game_active = games::ActiveModel {
        id: NotSet,
        status: Set(dto.status),
        min_players: Set(dto.min_players),
        created_at: Set(now),
        updated_at: Set(now),
        started_at: Set(None),
        finished_at: Set(None),
        version: Set(1),
    };

    game_active.insert(conn).await
}

/// Bump `version` if the game is currently in one of `statuses`.
///
/// Inside a transaction this is the first write, so on Postgres it takes the
/// row lock that serializes every mutation of the same game. Returns whether a
/// row matched; the caller re-reads to tell "missing" from "wrong status".
pub async fn touch_if_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    statuses: &[GameStatus],
) -> Result<bool, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result = games::Entity::update_many()
        .col_expr(games::Column::UpdatedAt, Expr::value(now))
        .col_expr(games::Column::Version, Expr::col(games::Column::Version).add(1))
        .filter(games::Column::Id.eq(game_id))
        .filter(games::Column::Status.is_in(statuses.iter().copied()))
        .exec(conn)
        .await?;

    Ok(result.rows_affected == 1)
}

/// Compare-and-swap `from -> to`. Returns false, writing nothing, when the
/// persisted status is not `from`.
///
/// Entering Started stamps `started_at`; entering Finished stamps `finished_at`.
pub async fn advance_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: StatusAdvance,
) -> Result<bool, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let mut update = games::Entity::update_many()
        .col_expr(games::Column::Status, Expr::value(dto.to))
        .col_expr(games::Column::UpdatedAt, Expr::value(now))
        .col_expr(games::Column::Version, Expr::col(games::Column::Version).add(1));

    match dto.to {
        GameStatus::Started => {
            update = update.col_expr(games::Column::StartedAt, Expr::value(Some(now)));
        }
        GameStatus::Finished => {
            update = update.col_expr(games::Column::FinishedAt, Expr::value(Some(now)));
        }
        GameStatus::Planned | GameStatus::Waiting => {}
    }

    let result = update
        .filter(games::Column::Id.eq(dto.id))
        .filter(games::Column::Status.eq(dto.from))
        .exec(conn)
        .await?;

    Ok(result.rows_affected == 1)
}
