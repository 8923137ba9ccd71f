//! Engine configuration read from the environment.

use std::env;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_MIN_PLAYERS: u32 = 2;
pub const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_millis(5_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleConfig {
    /// Participants required before a game leaves Planned. Stored per game at creation.
    pub min_players: u32,
    /// Upper bound on any single storage call made by the engine.
    pub storage_timeout: Duration,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            min_players: DEFAULT_MIN_PLAYERS,
            storage_timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }
}

impl LifecycleConfig {
    /// Reads `GAME_MIN_PLAYERS` and `GAME_STORAGE_TIMEOUT_MS`; unset values use the defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Ok(raw) = env::var("GAME_MIN_PLAYERS") {
            let min_players = raw.trim().parse::<u32>().map_err(|_| {
                AppError::config(format!("GAME_MIN_PLAYERS must be a positive integer, got '{raw}'"))
            })?;
            config = config.with_min_players(min_players)?;
        }

        if let Ok(raw) = env::var("GAME_STORAGE_TIMEOUT_MS") {
            let millis = raw.trim().parse::<u64>().ok().filter(|ms| *ms > 0).ok_or_else(|| {
                AppError::config(format!(
                    "GAME_STORAGE_TIMEOUT_MS must be a positive integer, got '{raw}'"
                ))
            })?;
            config.storage_timeout = Duration::from_millis(millis);
        }

        Ok(config)
    }

    pub fn with_min_players(mut self, min_players: u32) -> Result<Self, AppError> {
        if min_players == 0 || min_players > i32::MAX as u32 {
            return Err(AppError::config(format!(
                "min_players must be between 1 and {}, got {min_players}",
                i32::MAX
            )));
        }
        self.min_players = min_players;
        Ok(self)
    }

    pub fn with_storage_timeout(mut self, timeout: Duration) -> Self {
        self.storage_timeout = timeout;
        self
    }
}
