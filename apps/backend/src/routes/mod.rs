use actix_web::web;

pub mod games;
pub mod health;

/// Register every route. `main.rs` and the HTTP tests share this.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Game lifecycle: /api/games/**
    cfg.service(web::scope("/api/games").configure(games::configure_routes));
}
