//! Game lifecycle HTTP routes.

use actix_web::{web, HttpResponse, Result};

use crate::error::AppError;
use crate::extractors::auth_token::AuthToken;
use crate::extractors::game_id::GameId;
use crate::state::app_state::AppState;

/// POST /api/games
///
/// Creates a game owned by the caller. 201 with the game view.
async fn create_game(
    token: AuthToken,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let view = app_state.gateway.create_game(&token.token).await?;
    Ok(HttpResponse::Created().json(view))
}

/// GET /api/games/{game_id}
async fn get_game(
    token: AuthToken,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let view = app_state.gateway.find_game(&token.token, game_id.0).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// POST /api/games/{game_id}/join
async fn join_game(
    token: AuthToken,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let view = app_state.gateway.join_game(&token.token, game_id.0).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// POST /api/games/{game_id}/start
///
/// Records the caller as ready. The body's `outcome` is `started` only for the
/// request that completed the quorum.
async fn start_game(
    token: AuthToken,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let view = app_state
        .gateway
        .request_start(&token.token, game_id.0)
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_game)));
    cfg.service(web::resource("/{game_id}").route(web::get().to(get_game)));
    cfg.service(web::resource("/{game_id}/join").route(web::post().to(join_game)));
    cfg.service(web::resource("/{game_id}/start").route(web::post().to(start_game)));
}
