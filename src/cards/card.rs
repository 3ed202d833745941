//! Card instances - runtime card state.
//!
//! A `Card` is one tile on the board: a catalog entry bound to a position,
//! plus the two flags the controller mutates during play.

use serde::{Deserialize, Serialize};

use super::catalog::CatalogEntry;
use crate::core::Position;

/// A card on the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Board position, unique for the game.
    pub position: Position,

    /// Pair type shown when face up.
    pub content: CatalogEntry,

    /// Turned face up by a selection that has not been resolved away.
    pub is_flipped: bool,

    /// Part of a confirmed pair.
    pub is_matched: bool,
}

impl Card {
    /// Create a face-down, unmatched card.
    #[must_use]
    pub fn new(position: Position, content: CatalogEntry) -> Self {
        Self {
            position,
            content,
            is_flipped: false,
            is_matched: false,
        }
    }

    /// Whether the card's content is visible.
    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.is_flipped || self.is_matched
    }

    /// Whether a selection of this card would be accepted.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        !self.is_flipped && !self.is_matched
    }

    /// Check if two cards form a pair.
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.content.matches(&other.content)
    }
}
