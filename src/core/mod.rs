//! Core engine types: board positions, RNG, configuration.
//!
//! These are the building blocks shared by the deck builder, the
//! flip/match controller and the completion tracker.

pub mod position;
pub mod rng;
pub mod config;

pub use position::Position;
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, DEFAULT_BEST_SCORE_KEY};
