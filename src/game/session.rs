//! Game session state.
//!
//! ## GameSession
//!
//! Everything the view layer renders plus the bookkeeping the controller
//! needs:
//! - Board (cards with flipped/matched flags)
//! - Current selection (at most two positions)
//! - Move count, score, best score
//! - Completion and new-best flags
//! - Move history and board epoch
//!
//! The board and history use `im` persistent vectors so views and snapshots
//! clone in O(1).

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Card;
use crate::core::Position;
use crate::resolution::Epoch;

/// One resolved move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// First card chosen.
    pub first: Position,
    /// Second card chosen.
    pub second: Position,
    /// Whether the pair matched.
    pub matched: bool,
}

/// Mutable state of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    /// Cards in board order; `cards[i].position == Position(i)`.
    pub(crate) cards: Vector<Card>,

    /// Positions chosen in the current move.
    pub(crate) selected: SmallVec<[Position; 2]>,

    /// Completed two-card selections this game.
    pub(crate) move_count: u32,

    /// Current score. Never negative.
    pub(crate) score: u32,

    /// Best final score across games.
    pub(crate) best_score: u32,

    /// All pairs matched and bonus applied.
    pub(crate) is_complete: bool,

    /// This game's final score beat the previous best.
    pub(crate) is_new_best_score: bool,

    /// Resolved moves, oldest first.
    pub(crate) history: Vector<MoveRecord>,

    /// Board generation.
    pub(crate) epoch: Epoch,
}

impl GameSession {
    /// Create a session over a freshly dealt board.
    #[must_use]
    pub fn new(cards: Vector<Card>, best_score: u32) -> Self {
        Self {
            cards,
            selected: SmallVec::new(),
            move_count: 0,
            score: 0,
            best_score,
            is_complete: false,
            is_new_best_score: false,
            history: Vector::new(),
            epoch: Epoch::default(),
        }
    }

    /// Replace the board and clear per-game state.
    ///
    /// Keeps the best score and starts a new epoch.
    pub fn reset(&mut self, cards: Vector<Card>) {
        self.cards = cards;
        self.selected.clear();
        self.move_count = 0;
        self.score = 0;
        self.is_complete = false;
        self.is_new_best_score = false;
        self.history = Vector::new();
        self.epoch = self.epoch.next();
    }

    // === Board ===

    /// Cards in board order.
    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    /// Number of cards on the board.
    #[must_use]
    pub fn board_size(&self) -> usize {
        self.cards.len()
    }

    /// Card at a position, if on the board.
    #[must_use]
    pub fn card(&self, position: Position) -> Option<&Card> {
        self.cards.get(position.index())
    }

    pub(crate) fn card_mut(&mut self, position: Position) -> Option<&mut Card> {
        self.cards.get_mut(position.index())
    }

    /// Check if every card is matched.
    #[must_use]
    pub fn all_matched(&self) -> bool {
        self.cards.iter().all(|card| card.is_matched)
    }

    /// Number of matched pairs.
    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.cards.iter().filter(|card| card.is_matched).count() / 2
    }

    /// Positions a selection would currently be accepted for.
    #[must_use]
    pub fn selectable_positions(&self) -> Vec<Position> {
        if self.pair_pending() || self.is_complete {
            return Vec::new();
        }
        self.cards
            .iter()
            .filter(|card| card.is_selectable())
            .map(|card| card.position)
            .collect()
    }

    // === Selection ===

    /// Positions chosen in the current move.
    #[must_use]
    pub fn selected(&self) -> &[Position] {
        &self.selected
    }

    /// Check if two cards await resolution.
    #[must_use]
    pub fn pair_pending(&self) -> bool {
        self.selected.len() >= 2
    }

    // === Scores ===

    /// Completed moves this game.
    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Current score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Best final score across games.
    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Check if the game is complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Check if this game set a new best score.
    #[must_use]
    pub fn is_new_best_score(&self) -> bool {
        self.is_new_best_score
    }

    /// Resolved moves, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    /// Current board generation.
    #[must_use]
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }
}
