use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Lifecycle status of a game. Progression is strictly linear:
/// `Planned -> Waiting -> Started -> Finished`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[sea_orm(string_value = "planned")]
    Planned,
    #[sea_orm(string_value = "waiting")]
    Waiting,
    #[sea_orm(string_value = "started")]
    Started,
    #[sea_orm(string_value = "finished")]
    Finished,
}

impl GameStatus {
    /// The only status this one may advance to, if any.
    pub fn next(self) -> Option<GameStatus> {
        match self {
            GameStatus::Planned => Some(GameStatus::Waiting),
            GameStatus::Waiting => Some(GameStatus::Started),
            GameStatus::Started => Some(GameStatus::Finished),
            GameStatus::Finished => None,
        }
    }

    pub fn accepts_joins(self) -> bool {
        matches!(self, GameStatus::Planned | GameStatus::Waiting)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameStatus::Planned => "planned",
            GameStatus::Waiting => "waiting",
            GameStatus::Started => "started",
            GameStatus::Finished => "finished",
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub status: GameStatus,
    #[sea_orm(column_name = "min_players")]
    pub min_players: i32,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
    #[sea_orm(column_name = "started_at")]
    pub started_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "finished_at")]
    pub finished_at: Option<OffsetDateTime>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::game_players::Entity")]
    GamePlayers,
    #[sea_orm(has_many = "super::game_results::Entity")]
    GameResults,
    #[sea_orm(has_many = "super::game_prizes::Entity")]
    GamePrizes,
}

impl Related<super::game_players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GamePlayers.def()
    }
}

impl Related<super::game_results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameResults.def()
    }
}

impl Related<super::game_prizes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GamePrizes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
