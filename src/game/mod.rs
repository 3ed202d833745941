//! The game state engine.
//!
//! - `session`: Mutable per-game state (board, selection, scores)
//! - `engine`: `MemoryGame`, the flip/match controller
//! - `completion`: Completion bonus and best-score tracking
//! - `view`: Render-facing read model
//! - `snapshot`: Save and restore of a game in progress

mod completion;
mod engine;
mod session;
mod snapshot;
mod view;

pub use completion::{evaluate_completion, CompletionReport};
pub use engine::{IgnoreReason, MemoryGame, SelectOutcome};
pub use session::{GameSession, MoveRecord};
pub use snapshot::{SessionSnapshot, SnapshotError};
pub use view::{CardFace, CardView, GameView};
