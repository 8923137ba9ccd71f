//! Lost races, storage outages and timeouts, injected through a wrapping store.

mod common;
mod support;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use gamehub::config::db::DbProfile;
use gamehub::errors::domain::{DomainError, InfraErrorKind};
use gamehub::errors::ErrorCode;
use gamehub::infra::state::build_state;
use gamehub::services::lifecycle::StartOutcome;
use gamehub::{AppError, GameStatus};
use support::faulty_store::{Faults, FaultyStore};
use support::{config, engine, game_with, memory_state_with_store, seed_player, seed_players, token_for};

#[tokio::test]
async fn lost_cas_is_acknowledged_after_one_reread() {
    let faults = Arc::new(Faults::default());
    let layer_faults = faults.clone();
    let state =
        memory_state_with_store(2, move |inner| FaultyStore::wrap(inner, layer_faults)).await;
    let players = seed_players(&state, 2).await;
    let engine = engine(&state);
    let game = game_with(&state, &players).await;

    faults.lose_cas.store(true, Ordering::SeqCst);
    engine.request_start(players[0], game.id).await.unwrap();
    let outcome = engine.request_start(players[1], game.id).await.unwrap();

    assert!(matches!(outcome, StartOutcome::Acknowledged(_)));
    assert_eq!(faults.cas_attempts.load(Ordering::SeqCst), 1);
    assert_eq!(outcome.game().status, GameStatus::Waiting);
    assert!(outcome.game().quorum_reached());
}

#[tokio::test]
async fn storage_outage_surfaces_as_unavailable() {
    let faults = Arc::new(Faults::default());
    let layer_faults = faults.clone();
    let state =
        memory_state_with_store(2, move |inner| FaultyStore::wrap(inner, layer_faults)).await;
    let alice = seed_player(&state, "alice").await;
    faults.storage_down.store(true, Ordering::SeqCst);

    let err = engine(&state).create_game(alice).await.unwrap_err();
    assert!(matches!(err, DomainError::Infra(InfraErrorKind::DbUnavailable, _)));
    assert!(err.is_retryable());

    let app_err = state
        .gateway
        .create_game(&token_for(&state, alice))
        .await
        .unwrap_err();
    assert_eq!(app_err.code(), ErrorCode::StorageUnavailable);
    assert_eq!(app_err.status().as_u16(), 503);
}

#[tokio::test]
async fn slow_storage_times_out_without_partial_join() {
    let faults = Arc::new(Faults::default());
    let layer_faults = faults.clone();
    let state = build_state()
        .with_db(DbProfile::InMemory)
        .with_lifecycle(config(2).with_storage_timeout(Duration::from_millis(50)))
        .with_game_store_layer(move |inner| FaultyStore::wrap(inner, layer_faults))
        .build()
        .await
        .unwrap();
    let players = seed_players(&state, 2).await;
    let engine = engine(&state);
    let game = engine.create_game(players[0]).await.unwrap();

    faults.append_delay_ms.store(500, Ordering::SeqCst);
    let err = engine.join_game(players[1], game.id).await.unwrap_err();
    assert!(matches!(err, DomainError::Infra(InfraErrorKind::Timeout, _)));
    assert_eq!(AppError::from(err).code(), ErrorCode::StorageUnavailable);

    let game = engine.find_game(players[0], game.id).await.unwrap();
    assert_eq!(game.participant_ids(), vec![players[0]]);
    assert_eq!(game.status, GameStatus::Planned);
}

#[tokio::test]
async fn abandoned_request_still_completes_its_join() {
    let faults = Arc::new(Faults::default());
    let layer_faults = faults.clone();
    let state =
        memory_state_with_store(2, move |inner| FaultyStore::wrap(inner, layer_faults)).await;
    let players = seed_players(&state, 2).await;
    let game = engine(&state).create_game(players[0]).await.unwrap();

    faults.append_delay_ms.store(100, Ordering::SeqCst);
    let token = token_for(&state, players[1]);
    let abandoned = tokio::time::timeout(
        Duration::from_millis(10),
        state.gateway.join_game(&token, game.id),
    )
    .await;
    assert!(abandoned.is_err(), "caller gave up before the join finished");

    tokio::time::sleep(Duration::from_millis(400)).await;
    let game = engine(&state).find_game(players[0], game.id).await.unwrap();
    assert_eq!(game.participant_ids(), players);
    assert_eq!(game.status, GameStatus::Waiting);
}
