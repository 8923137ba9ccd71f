//! Maps authenticated calls onto the lifecycle engine.
//!
//! Each engine call runs on its own spawned task, so a caller that goes away
//! mid-request drops only the wait, never the storage work already in flight.

use std::future::Future;
use std::sync::Arc;

use tracing::error;

use crate::auth::identity::IdentityProvider;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::protocol::{GameView, StartView};
use crate::services::lifecycle::GameLifecycle;

#[derive(Clone)]
pub struct SessionGateway {
    identity: Arc<dyn IdentityProvider>,
    lifecycle: GameLifecycle,
}

impl SessionGateway {
    pub fn new(identity: Arc<dyn IdentityProvider>, lifecycle: GameLifecycle) -> Self {
        Self {
            identity,
            lifecycle,
        }
    }

    pub fn lifecycle(&self) -> &GameLifecycle {
        &self.lifecycle
    }

    async fn caller(&self, token: &str) -> Result<i64, AppError> {
        Ok(self.identity.resolve(token).await?)
    }

    pub async fn create_game(&self, token: &str) -> Result<GameView, AppError> {
        let player_id = self.caller(token).await?;
        let lifecycle = self.lifecycle.clone();
        let game = detached(async move { lifecycle.create_game(player_id).await }).await?;
        Ok(GameView::from(game))
    }

    pub async fn join_game(&self, token: &str, game_id: i64) -> Result<GameView, AppError> {
        let player_id = self.caller(token).await?;
        let lifecycle = self.lifecycle.clone();
        let game = detached(async move { lifecycle.join_game(player_id, game_id).await }).await?;
        Ok(GameView::from(game))
    }

    pub async fn request_start(&self, token: &str, game_id: i64) -> Result<StartView, AppError> {
        let player_id = self.caller(token).await?;
        let lifecycle = self.lifecycle.clone();
        let outcome =
            detached(async move { lifecycle.request_start(player_id, game_id).await }).await?;
        Ok(StartView::from(outcome))
    }

    pub async fn find_game(&self, token: &str, game_id: i64) -> Result<GameView, AppError> {
        let player_id = self.caller(token).await?;
        let game = self.lifecycle.find_game(player_id, game_id).await?;
        Ok(GameView::from(game))
    }
}

/// Run `fut` to completion on the runtime regardless of whether the caller keeps waiting.
async fn detached<T, F>(fut: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: Future<Output = Result<T, DomainError>> + Send + 'static,
{
    match tokio::spawn(fut).await {
        Ok(result) => result.map_err(AppError::from),
        Err(join_err) => {
            error!(error = %join_err, "Lifecycle task failed");
            Err(AppError::internal("Lifecycle task failed"))
        }
    }
}
