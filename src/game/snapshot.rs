//! Save and restore of an in-progress game.
//!
//! A `SessionSnapshot` captures the board, the RNG position, the virtual
//! clock and any pending resolution. Restoring it against the same catalog
//! resumes play exactly where it stopped, including the next deal.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::{Catalog, MatchKey};
use crate::core::{GameConfig, GameRng, GameRngState, Position};
use crate::resolution::{PendingResolution, ResolutionKind, ResolutionQueue};
use crate::store::ScoreStore;

use super::engine::MemoryGame;
use super::session::GameSession;

/// Errors raised while encoding or restoring a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot codec failed: {0}")]
    Codec(#[from] bincode::Error),

    #[error("snapshot has {found} cards, catalog deals {expected}")]
    BoardMismatch { expected: usize, found: usize },

    #[error("snapshot card at index {index} does not match its position")]
    PositionMismatch { index: usize },

    #[error("snapshot card uses key `{0}` missing from the catalog")]
    UnknownKey(MatchKey),

    #[error("snapshot deals key `{key}` {count} times")]
    UnpairedKey { key: MatchKey, count: usize },

    #[error("snapshot selection {selected:?} does not match the face-up cards")]
    InvalidSelection { selected: Vec<Position> },

    #[error("snapshot pending queue is out of step with {selected} selected cards")]
    QueueMismatch { selected: usize },
}

/// Serializable state of a game in progress.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session: GameSession,
    pub rng: GameRngState,
    pub queue: ResolutionQueue,
}

impl SessionSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Check the board against the catalog it will be restored with, and the
    /// selection against the pending queue.
    fn validate(&self, catalog: &Catalog) -> Result<(), SnapshotError> {
        let found = self.session.board_size();
        if found != catalog.deck_size() {
            return Err(SnapshotError::BoardMismatch {
                expected: catalog.deck_size(),
                found,
            });
        }

        let mut counts: FxHashMap<&MatchKey, usize> = FxHashMap::default();
        for (index, card) in self.session.cards().iter().enumerate() {
            if card.position.index() != index {
                return Err(SnapshotError::PositionMismatch { index });
            }
            if !catalog.contains(&card.content.match_key) {
                return Err(SnapshotError::UnknownKey(card.content.match_key.clone()));
            }
            *counts.entry(&card.content.match_key).or_insert(0) += 1;
        }
        if let Some((key, &count)) = counts.iter().find(|&(_, &count)| count != 2) {
            return Err(SnapshotError::UnpairedKey {
                key: (**key).clone(),
                count,
            });
        }

        self.validate_selection()?;
        self.validate_queue()
    }

    /// The selection holds at most two distinct cards, and they are exactly
    /// the face-up unmatched cards.
    fn validate_selection(&self) -> Result<(), SnapshotError> {
        let selected = self.session.selected();
        let face_up = self
            .session
            .cards()
            .iter()
            .filter(|card| card.is_flipped && !card.is_matched)
            .count();

        let valid = selected.len() <= 2
            && !matches!(selected, [a, b] if a == b)
            && selected.len() == face_up
            && selected.iter().all(|&position| {
                self.session
                    .card(position)
                    .is_some_and(|card| card.is_flipped && !card.is_matched)
            });

        if valid {
            Ok(())
        } else {
            Err(SnapshotError::InvalidSelection {
                selected: selected.to_vec(),
            })
        }
    }

    /// A selected pair has exactly one current resolution for it; a partial
    /// selection has none.
    fn validate_queue(&self) -> Result<(), SnapshotError> {
        let selected = self.session.selected();
        let current: Vec<&PendingResolution> = self
            .queue
            .iter()
            .filter(|pending| pending.epoch == self.session.epoch())
            .collect();

        let in_step = match (selected, current.as_slice()) {
            (&[first, second], &[pending]) => {
                let kind = self
                    .session
                    .card(first)
                    .zip(self.session.card(second))
                    .map(|(a, b)| ResolutionKind::for_pair(a.pairs_with(b)));
                pending.positions() == [first, second] && kind == Some(pending.kind)
            }
            (_, []) => selected.len() < 2,
            _ => false,
        };

        if in_step {
            Ok(())
        } else {
            Err(SnapshotError::QueueMismatch {
                selected: selected.len(),
            })
        }
    }
}

impl<S: ScoreStore> MemoryGame<S> {
    /// Capture the current game.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session: self.session.clone(),
            rng: self.rng().state(),
            queue: self.queue.clone(),
        }
    }

    /// Resume a captured game.
    ///
    /// The best score is the higher of the snapshot's and the store's, so a
    /// record set after the snapshot was taken is not lost.
    pub fn restore(
        snapshot: SessionSnapshot,
        config: GameConfig,
        catalog: Catalog,
        store: S,
    ) -> Result<Self, SnapshotError> {
        snapshot.validate(&catalog)?;

        let mut session = snapshot.session;
        if let Some(stored) = store.get() {
            session.best_score = session.best_score.max(stored);
        }

        log::debug!(
            "restored game at move {} ({}), {} pending",
            session.move_count(),
            session.epoch(),
            snapshot.queue.len()
        );

        Ok(Self::from_parts(
            config,
            catalog,
            store,
            GameRng::from_state(&snapshot.rng),
            session,
            snapshot.queue,
        ))
    }
}
