pub mod game_players;
pub mod game_prizes;
pub mod game_results;
pub mod games;
pub mod players;

pub use game_players::Entity as GamePlayers;
pub use game_players::Model as GamePlayer;
pub use game_prizes::Entity as GamePrizes;
pub use game_results::Entity as GameResults;
pub use games::Entity as Games;
pub use games::GameStatus;
pub use players::Entity as Players;
pub use players::Model as Player;
