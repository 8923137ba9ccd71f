//! SeaORM adapters. Every function is generic over `ConnectionTrait` and returns `DbErr`.

pub mod games_sea;
pub mod memberships_sea;
pub mod players_sea;
pub mod results_sea;
