//! Game events.
//!
//! The engine records an event for every observable change so a view layer
//! can animate or announce it. Events accumulate in an [`EventLog`] until
//! drained.
//!
//! ## Event Order
//!
//! A full game emits, per move: two `CardFlipped`, then one of
//! `PairMatched` / `PairMismatched` once resolved. Matching the last pair
//! is followed by `GameCompleted` and, when the record is beaten,
//! `NewBestScore`.

use serde::{Deserialize, Serialize};

use crate::cards::MatchKey;
use crate::core::Position;

/// Something that happened on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A card was turned face up by a selection.
    CardFlipped { position: Position },

    /// A pending pair was confirmed.
    PairMatched {
        first: Position,
        second: Position,
        key: MatchKey,
        score: u32,
    },

    /// A pending pair was turned back face down.
    PairMismatched {
        first: Position,
        second: Position,
        score: u32,
    },

    /// Every card is matched. Fires once per game.
    GameCompleted {
        moves: u32,
        bonus: u32,
        final_score: u32,
    },

    /// The final score beat the stored best score.
    NewBestScore { previous: u32, score: u32 },

    /// A new board was dealt.
    GameReset,
}

impl GameEvent {
    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::CardFlipped { .. } => "card_flipped",
            GameEvent::PairMatched { .. } => "pair_matched",
            GameEvent::PairMismatched { .. } => "pair_mismatched",
            GameEvent::GameCompleted { .. } => "game_completed",
            GameEvent::NewBestScore { .. } => "new_best_score",
            GameEvent::GameReset => "game_reset",
        }
    }
}

/// Buffer of events not yet consumed by the view layer.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event.
    pub fn push(&mut self, event: GameEvent) {
        log::trace!("event {}", event.name());
        self.events.push(event);
    }

    /// Events recorded since the last drain.
    #[must_use]
    pub fn pending(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take every recorded event, oldest first.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of undrained events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if there are no undrained events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_drain() {
        let mut log = EventLog::new();
        log.push(GameEvent::CardFlipped { position: Position::new(1) });
        log.push(GameEvent::GameReset);

        assert_eq!(log.len(), 2);
        assert_eq!(log.pending()[1], GameEvent::GameReset);

        let drained = log.drain();
        assert_eq!(
            drained,
            vec![
                GameEvent::CardFlipped { position: Position::new(1) },
                GameEvent::GameReset,
            ]
        );
        assert!(log.is_empty());
    }

    #[test]
    fn test_event_names() {
        assert_eq!(GameEvent::GameReset.name(), "game_reset");
        assert_eq!(
            GameEvent::NewBestScore { previous: 0, score: 1 }.name(),
            "new_best_score"
        );
    }

    #[test]
    fn test_event_serialization() {
        let event = GameEvent::GameCompleted {
            moves: 8,
            bonus: 34,
            final_score: 104,
        };

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }
}
