//! # memory-match
//!
//! State engine for a single-board memory matching card game.
//!
//! ## Rules
//!
//! 1. The board holds two face-down cards per catalog entry, shuffled.
//! 2. The player turns over two cards per move. A pair stays face up and
//!    scores 10 points; a mismatch turns back over and costs 1 point (the
//!    score never goes below zero).
//! 3. Matching the last pair adds a completion bonus of
//!    `max(50 - moves * 2, 10)`. A final score above the record becomes the
//!    new best score and is persisted.
//!
//! ## Architecture
//!
//! - **Host-driven time**: Pair outcomes apply after a delay (500ms match,
//!   1000ms mismatch). The engine keeps a virtual clock; hosts advance it or
//!   fire tickets from their own timers.
//!
//! - **Injected persistence**: The best score lives behind the
//!   `ScoreStore` capability, never a global.
//!
//! - **Epochs**: Reset starts a new board epoch; resolutions scheduled on an
//!   old board are discarded.
//!
//! ## Modules
//!
//! - `core`: Board positions, RNG, configuration
//! - `cards`: Catalog, card instances, deck building
//! - `resolution`: Deferred pair resolution queue
//! - `store`: Best-score persistence
//! - `events`: Event feed for the view layer
//! - `game`: Session state, controller, completion, views, snapshots

pub mod core;
pub mod cards;
pub mod resolution;
pub mod store;
pub mod events;
pub mod game;

// Re-export commonly used types
pub use crate::core::{GameConfig, GameRng, GameRngState, Position, DEFAULT_BEST_SCORE_KEY};

pub use crate::cards::{build_deck, Card, Catalog, CatalogEntry, CatalogError, MatchKey};

pub use crate::resolution::{
    Epoch, PendingResolution, ResolutionId, ResolutionKind, ResolutionQueue, ResolutionTicket,
};

pub use crate::store::{FileStore, MemoryStore, ScoreStore, StoreError};

pub use crate::events::{EventLog, GameEvent};

pub use crate::game::{
    CardFace, CardView, CompletionReport, GameSession, GameView, IgnoreReason, MemoryGame,
    MoveRecord, SelectOutcome, SessionSnapshot, SnapshotError,
};
