use std::sync::Arc;

use crate::auth::identity::{IdentityProvider, JwtIdentityProvider};
use crate::config::db::DbProfile;
use crate::config::lifecycle::LifecycleConfig;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::repos::game_store::{GameStore, SeaGameStore};
use crate::repos::players::SeaPlayerDirectory;
use crate::services::lifecycle::GameLifecycle;
use crate::services::session_gateway::SessionGateway;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Decorates the default store, e.g. to inject faults in tests.
pub type GameStoreLayer = Box<dyn FnOnce(Arc<dyn GameStore>) -> Arc<dyn GameStore> + Send>;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    db_profile: Option<DbProfile>,
    lifecycle_config: LifecycleConfig,
    store_layer: Option<GameStoreLayer>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            db_profile: None,
            lifecycle_config: LifecycleConfig::default(),
            store_layer: None,
        }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = Some(profile);
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_lifecycle(mut self, config: LifecycleConfig) -> Self {
        self.lifecycle_config = config;
        self
    }

    pub fn with_game_store_layer(
        mut self,
        layer: impl FnOnce(Arc<dyn GameStore>) -> Arc<dyn GameStore> + Send + 'static,
    ) -> Self {
        self.store_layer = Some(Box::new(layer));
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let profile = self
            .db_profile
            .ok_or_else(|| AppError::config("StateBuilder requires a database profile"))?;
        // single entrypoint: build + migrate
        let conn = bootstrap_db(profile).await?;

        let mut games: Arc<dyn GameStore> = Arc::new(SeaGameStore::new(conn.clone()));
        if let Some(layer) = self.store_layer {
            games = layer(games);
        }
        let players = Arc::new(SeaPlayerDirectory::new(conn.clone()));
        let identity: Arc<dyn IdentityProvider> =
            Arc::new(JwtIdentityProvider::new(self.security_config.clone()));

        let lifecycle = GameLifecycle::new(games, players, self.lifecycle_config);
        let gateway = SessionGateway::new(identity, lifecycle);

        Ok(AppState::new(conn, self.security_config, gateway))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
