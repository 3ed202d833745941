//! The memory game engine.
//!
//! `MemoryGame` ties the deck builder, the flip/match controller and the
//! completion tracker together around one [`GameSession`].
//!
//! ## Turn Flow
//!
//! 1. `select()` flips a card. The second card of a move counts the move and
//!    schedules the pair's resolution.
//! 2. The host drives time: `advance()` with elapsed milliseconds, `resolve()`
//!    with a ticket from its own timer, or `flush()` to settle immediately.
//! 3. Each applied resolution is followed by a completion check.
//!
//! ```
//! use memory_match::{GameConfig, MemoryGame, MemoryStore, Position, SelectOutcome};
//!
//! let mut game = MemoryGame::standard(GameConfig::default().with_seed(1), MemoryStore::new());
//!
//! assert_eq!(game.select(Position::new(0)), SelectOutcome::Flipped);
//! assert!(matches!(game.select(Position::new(1)), SelectOutcome::Pending(_)));
//! assert_eq!(game.move_count(), 1);
//!
//! game.advance(1000);
//! assert!(game.selected().is_empty());
//! ```

use serde::{Deserialize, Serialize};

use crate::cards::{build_deck, Card, Catalog};
use crate::core::{GameConfig, GameRng, Position};
use crate::events::{EventLog, GameEvent};
use crate::resolution::{PendingResolution, ResolutionKind, ResolutionQueue, ResolutionTicket};
use crate::store::ScoreStore;

use super::completion::{evaluate_completion, CompletionReport};
use super::session::{GameSession, MoveRecord};

/// Why a selection was not accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// No card at that position.
    OffBoard,
    /// The card is already face up in the current move.
    AlreadyFlipped,
    /// The card is part of a confirmed pair.
    AlreadyMatched,
    /// Two cards are waiting for resolution.
    PairPending,
    /// The game is over; reset to play again.
    GameComplete,
}

/// Result of a selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectOutcome {
    /// First card of a move turned face up.
    Flipped,
    /// Second card turned face up; the move is counted and its resolution
    /// is scheduled.
    Pending(ResolutionTicket),
    /// Nothing changed.
    Ignored(IgnoreReason),
}

impl SelectOutcome {
    /// Whether the selection changed the board.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        !matches!(self, SelectOutcome::Ignored(_))
    }
}

/// Memory game engine.
///
/// Generic over the best-score capability so tests can inject a
/// [`MemoryStore`](crate::store::MemoryStore) and hosts a real backend.
pub struct MemoryGame<S: ScoreStore> {
    config: GameConfig,
    catalog: Catalog,
    store: S,
    rng: GameRng,
    pub(crate) session: GameSession,
    pub(crate) queue: ResolutionQueue,
    events: EventLog,
}

impl<S: ScoreStore> MemoryGame<S> {
    /// Create a game dealing from `catalog`.
    ///
    /// The best score is loaded from `store`; absent or malformed values
    /// start at 0.
    pub fn new(config: GameConfig, catalog: Catalog, store: S) -> Self {
        let mut rng = GameRng::from_seed_or_entropy(config.seed);
        let best_score = store.get().unwrap_or(0);
        let session = GameSession::new(build_deck(&catalog, &mut rng), best_score);

        log::debug!(
            "new game: {} cards, best score {}, seed {}",
            session.board_size(),
            best_score,
            rng.seed()
        );

        Self {
            config,
            catalog,
            store,
            rng,
            session,
            queue: ResolutionQueue::new(),
            events: EventLog::new(),
        }
    }

    /// Create a game with the standard four-pair catalog.
    pub fn standard(config: GameConfig, store: S) -> Self {
        Self::new(config, Catalog::standard(), store)
    }

    /// Reassemble a game from saved parts.
    pub(crate) fn from_parts(
        config: GameConfig,
        catalog: Catalog,
        store: S,
        rng: GameRng,
        session: GameSession,
        queue: ResolutionQueue,
    ) -> Self {
        Self {
            config,
            catalog,
            store,
            rng,
            session,
            queue,
            events: EventLog::new(),
        }
    }

    // === Input ===

    /// Select the card at `position`.
    ///
    /// Disallowed selections are silent no-ops reported as
    /// [`SelectOutcome::Ignored`].
    pub fn select(&mut self, position: Position) -> SelectOutcome {
        if let Err(reason) = self.check_selectable(position) {
            log::debug!("ignored selection of {}: {:?}", position, reason);
            return SelectOutcome::Ignored(reason);
        }

        if let Some(card) = self.session.card_mut(position) {
            card.is_flipped = true;
        }
        self.session.selected.push(position);
        self.events.push(GameEvent::CardFlipped { position });

        let (first, second) = match self.session.selected.as_slice() {
            [first, second] => (*first, *second),
            _ => {
                log::debug!("flipped {}", position);
                return SelectOutcome::Flipped;
            }
        };

        self.session.move_count += 1;

        let matched = match (self.session.card(first), self.session.card(second)) {
            (Some(a), Some(b)) => a.pairs_with(b),
            _ => false,
        };
        let kind = ResolutionKind::for_pair(matched);
        let ticket = self.queue.schedule(
            self.session.epoch,
            first,
            second,
            kind,
            self.config.resolution_delay_ms(matched),
        );

        log::debug!(
            "move {}: {} and {} -> {:?} in {}ms",
            self.session.move_count,
            first,
            second,
            kind,
            ticket.delay_ms
        );

        SelectOutcome::Pending(ticket)
    }

    fn check_selectable(&self, position: Position) -> Result<(), IgnoreReason> {
        let card = self.session.card(position).ok_or(IgnoreReason::OffBoard)?;

        if self.session.is_complete {
            Err(IgnoreReason::GameComplete)
        } else if self.session.pair_pending() {
            Err(IgnoreReason::PairPending)
        } else if card.is_matched {
            Err(IgnoreReason::AlreadyMatched)
        } else if card.is_flipped {
            Err(IgnoreReason::AlreadyFlipped)
        } else {
            Ok(())
        }
    }

    /// Deal a fresh board and clear per-game state.
    ///
    /// The best score is kept. Pending resolutions are dropped and any
    /// outstanding ticket becomes stale.
    pub fn reset(&mut self) {
        let cards = build_deck(&self.catalog, &mut self.rng);
        self.queue.clear();
        self.session.reset(cards);
        self.events.push(GameEvent::GameReset);

        log::info!(
            "game reset ({}), best score {}",
            self.session.epoch,
            self.session.best_score
        );
    }

    // === Time ===

    /// Advance the virtual clock, applying every resolution that comes due.
    ///
    /// Returns the number of resolutions applied.
    pub fn advance(&mut self, elapsed_ms: u64) -> usize {
        let due = self.queue.advance(elapsed_ms);
        self.apply_all(due)
    }

    /// Apply a ticket's resolution now, ahead of the virtual clock.
    ///
    /// For hosts that run their own timers. Returns `false` for stale
    /// tickets (already applied, or scheduled before a reset).
    pub fn resolve(&mut self, ticket: ResolutionTicket) -> bool {
        if ticket.epoch != self.session.epoch {
            log::debug!("ignoring ticket {} from {}", ticket.id, ticket.epoch);
            return false;
        }
        match self.queue.take(ticket.id) {
            Some(pending) => self.apply(pending),
            None => {
                log::debug!("ticket {} already resolved", ticket.id);
                false
            }
        }
    }

    /// Apply every pending resolution immediately.
    ///
    /// Returns the number of resolutions applied.
    pub fn flush(&mut self) -> usize {
        let pending = self.queue.drain();
        self.apply_all(pending)
    }

    fn apply_all(&mut self, pending: Vec<PendingResolution>) -> usize {
        pending
            .into_iter()
            .map(|p| self.apply(p))
            .filter(|&applied| applied)
            .count()
    }

    /// Apply one resolution after checking it still describes the board.
    fn apply(&mut self, pending: PendingResolution) -> bool {
        if !self.is_current(&pending) {
            log::debug!(
                "dropping stale {} for {} and {}",
                pending.id,
                pending.first,
                pending.second
            );
            return false;
        }

        for position in pending.positions() {
            if let Some(card) = self.session.card_mut(position) {
                match pending.kind {
                    ResolutionKind::Match => card.is_matched = true,
                    ResolutionKind::Mismatch => card.is_flipped = false,
                }
            }
        }
        self.session.selected.clear();

        match pending.kind {
            ResolutionKind::Match => {
                self.session.score = self.session.score.saturating_add(self.config.match_points);
                let key = self
                    .session
                    .card(pending.first)
                    .map(|card| card.content.match_key.clone())
                    .unwrap_or_default();
                self.events.push(GameEvent::PairMatched {
                    first: pending.first,
                    second: pending.second,
                    key,
                    score: self.session.score,
                });
            }
            ResolutionKind::Mismatch => {
                self.session.score = self
                    .session
                    .score
                    .saturating_sub(self.config.mismatch_penalty);
                self.events.push(GameEvent::PairMismatched {
                    first: pending.first,
                    second: pending.second,
                    score: self.session.score,
                });
            }
        }

        self.session.history.push_back(MoveRecord {
            first: pending.first,
            second: pending.second,
            matched: pending.kind.is_match(),
        });

        evaluate_completion(
            &mut self.session,
            &self.config,
            &mut self.store,
            &mut self.events,
        );
        true
    }

    fn is_current(&self, pending: &PendingResolution) -> bool {
        if pending.epoch != self.session.epoch {
            return false;
        }
        let selected = self.session.selected();
        pending.positions().iter().all(|&position| {
            selected.contains(&position)
                && self
                    .session
                    .card(position)
                    .is_some_and(|card| card.is_flipped && !card.is_matched)
        })
    }

    // === Outputs ===

    /// The session state.
    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Cards in board order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.session.cards().iter()
    }

    /// Card at a position.
    #[must_use]
    pub fn card(&self, position: Position) -> Option<&Card> {
        self.session.card(position)
    }

    /// Positions chosen in the current move.
    #[must_use]
    pub fn selected(&self) -> &[Position] {
        self.session.selected()
    }

    /// Positions a selection would currently be accepted for.
    #[must_use]
    pub fn selectable_positions(&self) -> Vec<Position> {
        self.session.selectable_positions()
    }

    /// Completed moves this game.
    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.session.move_count()
    }

    /// Current score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.session.score()
    }

    /// Best final score across games.
    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.session.best_score()
    }

    /// Check if the game is complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }

    /// Check if this game set a new best score.
    #[must_use]
    pub fn is_new_best_score(&self) -> bool {
        self.session.is_new_best_score()
    }

    /// Completion summary, once the game is complete.
    #[must_use]
    pub fn completion(&self) -> Option<CompletionReport> {
        if !self.session.is_complete {
            return None;
        }
        let moves = self.session.move_count;
        Some(CompletionReport {
            moves,
            bonus: self.config.completion_bonus(moves),
            final_score: self.session.score,
            new_best: self.session.is_new_best_score,
        })
    }

    /// Pending resolutions in due order.
    pub fn pending(&self) -> impl Iterator<Item = &PendingResolution> {
        self.queue.iter()
    }

    /// Current virtual clock.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.queue.now_ms()
    }

    /// Take every event recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    // === Accessors ===

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Catalog the board is dealt from.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The best-score store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub(crate) fn rng(&self) -> &GameRng {
        &self.rng
    }
}
