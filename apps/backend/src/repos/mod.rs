//! Domain-facing repositories over the SeaORM adapters.

pub mod game_store;
pub mod games;
pub mod players;
