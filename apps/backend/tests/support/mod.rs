#![allow(dead_code)]

// tests/support/mod.rs
pub mod faulty_store;

use std::env;
use std::sync::Arc;
use std::time::SystemTime;

use backend_test_support::unique_helpers::unique_display_name;
use gamehub::config::db::DbProfile;
use gamehub::config::lifecycle::LifecycleConfig;
use gamehub::infra::state::build_state;
use gamehub::repos::game_store::GameStore;
use gamehub::repos::games::Game;
use gamehub::repos::players;
use gamehub::services::lifecycle::GameLifecycle;
use gamehub::state::app_state::AppState;
use gamehub::state::security_config::SecurityConfig;
use gamehub::{mint_access_token, GameStatus};

pub const TEST_SECRET: &[u8] = b"gamehub_test_secret";

pub fn config(min_players: u32) -> LifecycleConfig {
    LifecycleConfig::default()
        .with_min_players(min_players)
        .expect("valid threshold")
}

/// Fresh in-memory database with migrations applied.
pub async fn memory_state(min_players: u32) -> AppState {
    state_on(DbProfile::InMemory, min_players).await
}

/// Database for the race suite. `GAMEHUB_RACE_DB=postgres` selects the `Test`
/// Postgres profile (`TEST_DB`, `APP_DB_*` and `GAMEHUB_OWNER_*` must be set),
/// where transactions from different pool connections really overlap. Anything
/// else uses the in-memory database, whose single connection serializes them.
pub fn race_profile() -> DbProfile {
    match env::var("GAMEHUB_RACE_DB").as_deref() {
        Ok("postgres") => DbProfile::Test,
        _ => DbProfile::InMemory,
    }
}

/// State on `race_profile()`. The Postgres database is shared between runs, so
/// callers must only assert on games and players they created themselves.
pub async fn race_state(min_players: u32) -> AppState {
    state_on(race_profile(), min_players).await
}

async fn state_on(profile: DbProfile, min_players: u32) -> AppState {
    build_state()
        .with_db(profile)
        .with_security(SecurityConfig::new(TEST_SECRET))
        .with_lifecycle(config(min_players))
        .build()
        .await
        .unwrap_or_else(|e| panic!("build {profile:?} state: {e}"))
}

/// Like `memory_state`, with the game store wrapped by `layer`.
pub async fn memory_state_with_store(
    min_players: u32,
    layer: impl FnOnce(Arc<dyn GameStore>) -> Arc<dyn GameStore> + Send + 'static,
) -> AppState {
    build_state()
        .with_db(DbProfile::InMemory)
        .with_security(SecurityConfig::new(TEST_SECRET))
        .with_lifecycle(config(min_players))
        .with_game_store_layer(layer)
        .build()
        .await
        .expect("build in-memory state")
}

pub fn engine(state: &AppState) -> GameLifecycle {
    state.lifecycle().clone()
}

pub async fn seed_player(state: &AppState, prefix: &str) -> i64 {
    let name = unique_display_name(prefix);
    players::create_player(&state.db, Some(name.as_str()))
        .await
        .expect("seed player")
        .id
}

pub async fn seed_players(state: &AppState, n: usize) -> Vec<i64> {
    let mut ids = Vec::with_capacity(n);
    for i in 0..n {
        ids.push(seed_player(state, &format!("p{i}")).await);
    }
    ids
}

pub fn token_for(state: &AppState, player_id: i64) -> String {
    mint_access_token(player_id, SystemTime::now(), &state.security).expect("mint token")
}

/// A game owned by `players[0]` that every other player has joined.
pub async fn game_with(state: &AppState, players: &[i64]) -> Game {
    let engine = engine(state);
    let (owner, rest) = players.split_first().expect("at least one player");
    let mut game = engine.create_game(*owner).await.expect("create game");
    for player in rest {
        game = engine.join_game(*player, game.id).await.expect("join game");
    }
    game
}

/// Drive a game with `players` all the way to Started.
pub async fn started_game(state: &AppState, players: &[i64]) -> Game {
    let engine = engine(state);
    let game = game_with(state, players).await;
    assert_eq!(game.status, GameStatus::Waiting);
    for player in players {
        engine
            .request_start(*player, game.id)
            .await
            .expect("request start");
    }
    let game = engine
        .find_game(players[0], game.id)
        .await
        .expect("reload game");
    assert_eq!(game.status, GameStatus::Started);
    game
}
