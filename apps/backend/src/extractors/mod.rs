pub mod auth_token;
pub mod game_id;

pub use auth_token::AuthToken;
pub use game_id::GameId;
