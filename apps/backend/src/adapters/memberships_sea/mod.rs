//! SeaORM adapter for game memberships (the `game_players` table).

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::game_players;

pub mod dto;

pub use dto::MembershipCreate;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_membership<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    player_id: i64,
) -> Result<Option<game_players::Model>, sea_orm::DbErr> {
    game_players::Entity::find()
        .filter(game_players::Column::GameId.eq(game_id))
        .filter(game_players::Column::PlayerId.eq(player_id))
        .one(conn)
        .await
}

/// All memberships of a game in join order.
pub async fn find_all_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<game_players::Model>, sea_orm::DbErr> {
    game_players::Entity::find()
        .filter(game_players::Column::GameId.eq(game_id))
        .order_by_asc(game_players::Column::JoinOrder)
        .all(conn)
        .await
}

pub async fn count_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    game_players::Entity::find()
        .filter(game_players::Column::GameId.eq(game_id))
        .count(conn)
        .await
}

pub async fn create_membership<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MembershipCreate,
) -> Result<game_players::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let membership_active = game_players::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        player_id: Set(dto.player_id),
        join_order: Set(dto.join_order),
        is_ready: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    };

    membership_active.insert(conn).await
}

/// Mark a membership ready. Returns false when it was already ready (or missing).
pub async fn set_ready<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    player_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    use sea_orm::sea_query::Expr;

    let result = game_players::Entity::update_many()
        .col_expr(game_players::Column::IsReady, Expr::value(true))
        .col_expr(
            game_players::Column::UpdatedAt,
            Expr::value(time::OffsetDateTime::now_utc()),
        )
        .filter(game_players::Column::GameId.eq(game_id))
        .filter(game_players::Column::PlayerId.eq(player_id))
        .filter(game_players::Column::IsReady.eq(false))
        .exec(conn)
        .await?;

    Ok(result.rows_affected == 1)
}
