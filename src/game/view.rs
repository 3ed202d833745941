//! Render-facing read model.
//!
//! `GameView` is everything a view layer draws: the counters, the flags and
//! one `CardView` per tile. Face-down cards carry no content, so a view
//! serialized to a client never reveals the layout.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::Position;
use crate::store::ScoreStore;

use super::engine::MemoryGame;
use super::session::GameSession;

/// Visible face of a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFace {
    pub display_text: String,
    pub is_special: bool,
}

/// One tile as rendered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub position: Position,
    pub is_flipped: bool,
    pub is_matched: bool,
    /// Present only while the card is face up.
    pub face: Option<CardFace>,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        let face = card.is_face_up().then(|| CardFace {
            display_text: card.content.display_text.clone(),
            is_special: card.content.is_special,
        });
        Self {
            position: card.position,
            is_flipped: card.is_flipped,
            is_matched: card.is_matched,
            face,
        }
    }
}

/// Snapshot of everything the view layer renders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub cards: Vec<CardView>,
    pub move_count: u32,
    pub score: u32,
    pub best_score: u32,
    pub is_complete: bool,
    pub is_new_best_score: bool,
    pub pairs_found: usize,
    pub total_pairs: usize,
    /// Two cards are face up awaiting resolution; input is blocked.
    pub input_blocked: bool,
}

impl From<&GameSession> for GameView {
    fn from(session: &GameSession) -> Self {
        Self {
            cards: session.cards().iter().map(CardView::from).collect(),
            move_count: session.move_count(),
            score: session.score(),
            best_score: session.best_score(),
            is_complete: session.is_complete(),
            is_new_best_score: session.is_new_best_score(),
            pairs_found: session.matched_pairs(),
            total_pairs: session.board_size() / 2,
            input_blocked: session.pair_pending(),
        }
    }
}

impl<S: ScoreStore> MemoryGame<S> {
    /// Build the render-facing view of the current state.
    #[must_use]
    pub fn view(&self) -> GameView {
        GameView::from(self.session())
    }
}
