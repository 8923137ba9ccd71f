//! Player repository: domain model, free functions and the `PlayerDirectory` seam.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection};
use time::OffsetDateTime;

use crate::adapters::players_sea as players_adapter;
use crate::entities::players;
use crate::errors::domain::DomainError;

/// Player domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: i64,
    pub display_name: Option<String>,
    /// Only ever increases (prizes from finished games).
    pub points: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<players::Model> for Player {
    fn from(m: players::Model) -> Self {
        Self {
            id: m.id,
            display_name: m.display_name,
            points: m.points,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<Player>, DomainError> {
    let player = players_adapter::find_by_id(conn, player_id).await?;
    Ok(player.map(Player::from))
}

/// Register a player row. Credential handling lives with the identity provider.
pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    display_name: Option<&str>,
) -> Result<Player, DomainError> {
    let player = players_adapter::create_player(conn, display_name.map(str::to_string)).await?;
    Ok(Player::from(player))
}

/// Resolves player identifiers to existing players.
#[async_trait]
pub trait PlayerDirectory: Send + Sync {
    async fn exists(&self, player_id: i64) -> Result<bool, DomainError>;

    async fn find(&self, player_id: i64) -> Result<Option<Player>, DomainError>;
}

/// `PlayerDirectory` backed by the `players` table.
#[derive(Debug, Clone)]
pub struct SeaPlayerDirectory {
    db: DatabaseConnection,
}

impl SeaPlayerDirectory {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlayerDirectory for SeaPlayerDirectory {
    async fn exists(&self, player_id: i64) -> Result<bool, DomainError> {
        Ok(players_adapter::exists(&self.db, player_id).await?)
    }

    async fn find(&self, player_id: i64) -> Result<Option<Player>, DomainError> {
        find_by_id(&self.db, player_id).await
    }
}
