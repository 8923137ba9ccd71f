mod common;
mod support;

use actix_web::http::header::AUTHORIZATION;
use actix_web::{test, web, App};
use common::assert_problem_details;
use gamehub::protocol::{GameView, StartView, StartViewOutcome};
use gamehub::routes;
use gamehub::GameStatus;
use serde_json::Value;
use support::{memory_state, seed_player, token_for};

fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {token}"))
}

#[actix_web::test]
async fn create_join_start_over_http() {
    let state = memory_state(2).await;
    let alice = seed_player(&state, "alice").await;
    let bob = seed_player(&state, "bob").await;
    let alice_token = token_for(&state, alice);
    let bob_token = token_for(&state, bob);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header(bearer(&alice_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let created: GameView = test::read_body_json(resp).await;
    assert_eq!(created.status, GameStatus::Planned);
    assert_eq!(created.owner, Some(alice));

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{}/join", created.id))
        .insert_header(bearer(&bob_token))
        .to_request();
    let joined: GameView = test::call_and_read_body_json(&app, req).await;
    assert_eq!(joined.status, GameStatus::Waiting);
    let ids: Vec<i64> = joined.participants.iter().map(|p| p.player_id).collect();
    assert_eq!(ids, vec![alice, bob]);

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{}/start", created.id))
        .insert_header(bearer(&alice_token))
        .to_request();
    let first: StartView = test::call_and_read_body_json(&app, req).await;
    assert_eq!(first.outcome, StartViewOutcome::Acknowledged);
    assert_eq!(first.game.status, GameStatus::Waiting);

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{}/start", created.id))
        .insert_header(bearer(&bob_token))
        .to_request();
    let second: StartView = test::call_and_read_body_json(&app, req).await;
    assert_eq!(second.outcome, StartViewOutcome::Started);
    assert_eq!(second.game.status, GameStatus::Started);
    assert!(second.game.started_at.is_some());

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{}/start", created.id))
        .insert_header(bearer(&alice_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 409, "ALREADY_STARTED").await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{}", created.id))
        .insert_header(bearer(&bob_token))
        .to_request();
    let fetched: GameView = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched.status, GameStatus::Started);
    assert!(fetched.participants.iter().all(|p| p.ready));
}

#[actix_web::test]
async fn error_responses_are_problem_details() {
    let state = memory_state(2).await;
    let alice = seed_player(&state, "alice").await;
    let carol = seed_player(&state, "carol").await;
    let alice_token = token_for(&state, alice);
    let carol_token = token_for(&state, carol);
    let ghost_token = token_for(&state, 90_210);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post().uri("/api/games").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 401, "UNAUTHORIZED_MISSING_BEARER").await;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header((AUTHORIZATION, "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 401, "UNAUTHENTICATED").await;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header(bearer(&ghost_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 401, "UNAUTHENTICATED").await;

    let req = test::TestRequest::post()
        .uri("/api/games/abc/join")
        .insert_header(bearer(&alice_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 400, "INVALID_GAME_ID").await;

    let req = test::TestRequest::post()
        .uri("/api/games/777/join")
        .insert_header(bearer(&alice_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 404, "GAME_NOT_FOUND").await;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header(bearer(&alice_token))
        .to_request();
    let created: GameView = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{}/join", created.id))
        .insert_header(bearer(&alice_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 409, "ALREADY_JOINED").await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{}/start", created.id))
        .insert_header(bearer(&carol_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, 403, "FORBIDDEN").await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{}/start", created.id))
        .insert_header(bearer(&alice_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let problem = assert_problem_details(resp, 409, "NOT_READY").await;
    assert_eq!(problem["title"], "Not Ready");
}

#[actix_web::test]
async fn health_reports_database_and_migrations() {
    let state = memory_state(2).await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert!(body["migrations"].as_u64().unwrap_or_default() >= 1);
}
