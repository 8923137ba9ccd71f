#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod protocol;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;

// Re-exports for public API
pub use auth::identity::{IdentityProvider, JwtIdentityProvider};
pub use auth::jwt::{mint_access_token, verify_access_token, Claims};
pub use config::db::{db_url, DbOwner, DbProfile};
pub use config::lifecycle::LifecycleConfig;
pub use entities::games::GameStatus;
pub use error::AppError;
pub use errors::domain::DomainError;
pub use errors::ErrorCode;
pub use extractors::auth_token::AuthToken;
pub use extractors::game_id::GameId;
pub use infra::db::{bootstrap_db, connect_db};
pub use infra::state::{build_state, StateBuilder};
pub use repos::game_store::{GameStore, SeaGameStore};
pub use repos::games::{Game, GamePrize, GameResult, NewGame, Participant};
pub use repos::players::{PlayerDirectory, SeaPlayerDirectory};
pub use services::lifecycle::{GameLifecycle, StartOutcome};
pub use services::session_gateway::SessionGateway;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
