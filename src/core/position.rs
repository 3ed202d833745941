//! Board positions.
//!
//! Every card on the board has a unique `Position`: its 0-based index in
//! board order. Positions are assigned when the deck is built and stay
//! stable until the next reset.
//!
//! ## Usage
//!
//! ```
//! use memory_match::core::Position;
//!
//! let board_size = 8;
//!
//! let first = Position::new(0);
//! let last = Position::new(7);
//!
//! assert!(first.is_on_board(board_size));
//! assert!(last.is_on_board(board_size));
//! assert!(!Position::new(8).is_on_board(board_size));
//! ```

use serde::{Deserialize, Serialize};

/// A card's place on the board.
///
/// Positions are plain indices into the board. Use `is_on_board(len)` before
/// indexing with a position that came from user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position(pub u32);

impl Position {
    /// Create a position from a board index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Check if this position exists on a board of `board_size` cards.
    #[must_use]
    pub const fn is_on_board(self, board_size: usize) -> bool {
        (self.0 as usize) < board_size
    }

    /// Get the board index as `usize`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw position value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Iterate over every position on a board of `board_size` cards.
    ///
    /// Boards larger than `u32::MAX` cards stop at the last representable
    /// position.
    pub fn all(board_size: usize) -> impl Iterator<Item = Position> {
        let end = u32::try_from(board_size).unwrap_or(u32::MAX);
        (0..end).map(Position)
    }
}

impl From<u32> for Position {
    fn from(index: u32) -> Self {
        Self(index)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Position({})", self.0)
    }
}
