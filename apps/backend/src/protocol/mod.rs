//! Wire-facing views of the game aggregate.

pub mod game_view;

pub use game_view::{GameView, ParticipantView, StartView, StartViewOutcome};
