//! SeaORM adapter for players - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, Set,
};

use crate::entities::players;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find_by_id(player_id).one(conn).await
}

pub async fn exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let count = players::Entity::find()
        .filter(players::Column::Id.eq(player_id))
        .count(conn)
        .await?;
    Ok(count > 0)
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    display_name: Option<String>,
) -> Result<players::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let player_active = players::ActiveModel {
        id: NotSet,
        display_name: Set(display_name),
        points: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
    };

    player_active.insert(conn).await
}

/// Credit `amount` points to a player. Points never decrease, so callers pass
/// non-negative amounts only.
pub async fn add_points<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    amount: i64,
) -> Result<bool, sea_orm::DbErr> {
    let result = players::Entity::update_many()
        .col_expr(
            players::Column::Points,
            Expr::col(players::Column::Points).add(amount),
        )
        .col_expr(
            players::Column::UpdatedAt,
            Expr::value(time::OffsetDateTime::now_utc()),
        )
        .filter(players::Column::Id.eq(player_id))
        .exec(conn)
        .await?;

    Ok(result.rows_affected == 1)
}
