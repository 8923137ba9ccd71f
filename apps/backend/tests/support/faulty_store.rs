//! `GameStore` decorator that injects failures and delays.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use gamehub::entities::games::GameStatus;
use gamehub::errors::domain::{DomainError, InfraErrorKind};
use gamehub::repos::game_store::GameStore;
use gamehub::repos::games::{Game, GamePrize, GameResult, NewGame};

#[derive(Default)]
pub struct Faults {
    /// Every call fails with `DbUnavailable`.
    pub storage_down: AtomicBool,
    /// `try_advance_status` reports a lost CAS without touching storage.
    pub lose_cas: AtomicBool,
    /// Milliseconds to sleep before `append_participant`.
    pub append_delay_ms: AtomicUsize,
    pub cas_attempts: AtomicUsize,
}

pub struct FaultyStore {
    inner: Arc<dyn GameStore>,
    faults: Arc<Faults>,
}

impl FaultyStore {
    pub fn wrap(inner: Arc<dyn GameStore>, faults: Arc<Faults>) -> Arc<dyn GameStore> {
        Arc::new(Self { inner, faults })
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.faults.storage_down.load(Ordering::SeqCst) {
            return Err(DomainError::infra(
                InfraErrorKind::DbUnavailable,
                "Database unavailable",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl GameStore for FaultyStore {
    async fn insert(&self, game: NewGame) -> Result<Game, DomainError> {
        self.check()?;
        self.inner.insert(game).await
    }

    async fn find_by_id(&self, game_id: i64) -> Result<Option<Game>, DomainError> {
        self.check()?;
        self.inner.find_by_id(game_id).await
    }

    async fn append_participant(&self, game_id: i64, player_id: i64) -> Result<Game, DomainError> {
        self.check()?;
        let delay = self.faults.append_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay as u64)).await;
        }
        self.inner.append_participant(game_id, player_id).await
    }

    async fn record_ready(&self, game_id: i64, player_id: i64) -> Result<Game, DomainError> {
        self.check()?;
        self.inner.record_ready(game_id, player_id).await
    }

    async fn try_advance_status(
        &self,
        game_id: i64,
        from: GameStatus,
        to: GameStatus,
    ) -> Result<bool, DomainError> {
        self.check()?;
        self.faults.cas_attempts.fetch_add(1, Ordering::SeqCst);
        if self.faults.lose_cas.load(Ordering::SeqCst) {
            return Ok(false);
        }
        self.inner.try_advance_status(game_id, from, to).await
    }

    async fn finish(&self, game_id: i64, ranking: Vec<i64>) -> Result<bool, DomainError> {
        self.check()?;
        self.inner.finish(game_id, ranking).await
    }

    async fn replace_prizes(
        &self,
        game_id: i64,
        prizes: Vec<GamePrize>,
    ) -> Result<Vec<GamePrize>, DomainError> {
        self.check()?;
        self.inner.replace_prizes(game_id, prizes).await
    }

    async fn find_prizes(&self, game_id: i64) -> Result<Vec<GamePrize>, DomainError> {
        self.check()?;
        self.inner.find_prizes(game_id).await
    }

    async fn find_results(&self, game_id: i64) -> Result<Vec<GameResult>, DomainError> {
        self.check()?;
        self.inner.find_results(game_id).await
    }
}
