use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Players {
    Table,
    Id,
    DisplayName,
    Points,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Games {
    Table,
    Id,
    Status,
    MinPlayers,
    CreatedAt,
    UpdatedAt,
    StartedAt,
    FinishedAt,
    Version,
}

#[derive(Iden)]
enum GamePlayers {
    Table,
    Id,
    GameId,
    PlayerId,
    JoinOrder,
    IsReady,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum GameResults {
    Table,
    Id,
    GameId,
    PlayerId,
    Place,
    CreatedAt,
}

#[derive(Iden)]
enum GamePrizes {
    Table,
    Id,
    GameId,
    Place,
    Prize,
    CreatedAt,
}

fn id_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .primary_key()
        .auto_increment()
        .to_owned()
}

fn timestamp_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // players
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(&mut id_col(Players::Id))
                    .col(ColumnDef::new(Players::DisplayName).string().null())
                    .col(
                        ColumnDef::new(Players::Points)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(&mut timestamp_col(Players::CreatedAt))
                    .col(&mut timestamp_col(Players::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // games: status is stored as text so both backends share one representation
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(&mut id_col(Games::Id))
                    .col(ColumnDef::new(Games::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Games::MinPlayers).integer().not_null())
                    .col(&mut timestamp_col(Games::CreatedAt))
                    .col(&mut timestamp_col(Games::UpdatedAt))
                    .col(
                        ColumnDef::new(Games::StartedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Games::FinishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Games::Version)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .to_owned(),
            )
            .await?;

        // game_players
        manager
            .create_table(
                Table::create()
                    .table(GamePlayers::Table)
                    .if_not_exists()
                    .col(&mut id_col(GamePlayers::Id))
                    .col(ColumnDef::new(GamePlayers::GameId).big_integer().not_null())
                    .col(
                        ColumnDef::new(GamePlayers::PlayerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GamePlayers::JoinOrder).integer().not_null())
                    .col(
                        ColumnDef::new(GamePlayers::IsReady)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(&mut timestamp_col(GamePlayers::CreatedAt))
                    .col(&mut timestamp_col(GamePlayers::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_players_game_id")
                            .from(GamePlayers::Table, GamePlayers::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_players_player_id")
                            .from(GamePlayers::Table, GamePlayers::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_game_players_game_player")
                    .table(GamePlayers::Table)
                    .col(GamePlayers::GameId)
                    .col(GamePlayers::PlayerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_game_players_game_join_order")
                    .table(GamePlayers::Table)
                    .col(GamePlayers::GameId)
                    .col(GamePlayers::JoinOrder)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // game_results
        manager
            .create_table(
                Table::create()
                    .table(GameResults::Table)
                    .if_not_exists()
                    .col(&mut id_col(GameResults::Id))
                    .col(ColumnDef::new(GameResults::GameId).big_integer().not_null())
                    .col(
                        ColumnDef::new(GameResults::PlayerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GameResults::Place).small_integer().not_null())
                    .col(&mut timestamp_col(GameResults::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_results_game_id")
                            .from(GameResults::Table, GameResults::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_results_player_id")
                            .from(GameResults::Table, GameResults::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_game_results_game_player")
                    .table(GameResults::Table)
                    .col(GameResults::GameId)
                    .col(GameResults::PlayerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_game_results_game_place")
                    .table(GameResults::Table)
                    .col(GameResults::GameId)
                    .col(GameResults::Place)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // game_prizes
        manager
            .create_table(
                Table::create()
                    .table(GamePrizes::Table)
                    .if_not_exists()
                    .col(&mut id_col(GamePrizes::Id))
                    .col(ColumnDef::new(GamePrizes::GameId).big_integer().not_null())
                    .col(ColumnDef::new(GamePrizes::Place).small_integer().not_null())
                    .col(ColumnDef::new(GamePrizes::Prize).big_integer().not_null())
                    .col(&mut timestamp_col(GamePrizes::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_prizes_game_id")
                            .from(GamePrizes::Table, GamePrizes::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_game_prizes_game_place")
                    .table(GamePrizes::Table)
                    .col(GamePrizes::GameId)
                    .col(GamePrizes::Place)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GamePrizes::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GameResults::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GamePlayers::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Players::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
