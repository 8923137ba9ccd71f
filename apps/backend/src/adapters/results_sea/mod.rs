//! SeaORM adapter for finished-game results and configured prizes.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::{game_prizes, game_results};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn insert_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    player_id: i64,
    place: i16,
) -> Result<game_results::Model, sea_orm::DbErr> {
    game_results::ActiveModel {
        id: NotSet,
        game_id: Set(game_id),
        player_id: Set(player_id),
        place: Set(place),
        created_at: Set(time::OffsetDateTime::now_utc()),
    }
    .insert(conn)
    .await
}

pub async fn find_results<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<game_results::Model>, sea_orm::DbErr> {
    game_results::Entity::find()
        .filter(game_results::Column::GameId.eq(game_id))
        .order_by_asc(game_results::Column::Place)
        .all(conn)
        .await
}

pub async fn find_prizes<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<game_prizes::Model>, sea_orm::DbErr> {
    game_prizes::Entity::find()
        .filter(game_prizes::Column::GameId.eq(game_id))
        .order_by_asc(game_prizes::Column::Place)
        .all(conn)
        .await
}

/// Replace the whole prize table of a game with `(place, prize)` pairs.
pub async fn replace_prizes<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    prizes: &[(i16, i64)],
) -> Result<Vec<game_prizes::Model>, sea_orm::DbErr> {
    game_prizes::Entity::delete_many()
        .filter(game_prizes::Column::GameId.eq(game_id))
        .exec(conn)
        .await?;

    let now = time::OffsetDateTime::now_utc();
    let mut stored = Vec::with_capacity(prizes.len());
    for &(place, prize) in prizes {
        let model = game_prizes::ActiveModel {
            id: NotSet,
            game_id: Set(game_id),
            place: Set(place),
            prize: Set(prize),
            created_at: Set(now),
        }
        .insert(conn)
        .await?;
        stored.push(model);
    }
    stored.sort_by_key(|p| p.place);
    Ok(stored)
}
