//! Deferred pair resolution.
//!
//! When the second card of a move is chosen, the pair's outcome is decided
//! immediately but applied later: after the match delay for a pair, after
//! the mismatch delay otherwise. This module holds those pending
//! resolutions.
//!
//! ## Time Model
//!
//! The engine owns no timers. A [`ResolutionQueue`] keeps a virtual clock in
//! milliseconds; hosts either advance it (`advance`) or fire a specific
//! [`ResolutionTicket`] from their own timer.
//!
//! ## Epochs
//!
//! Every entry records the [`Epoch`] of the board it was scheduled on. A
//! reset starts a new epoch, so a ticket from a discarded board can never
//! touch the new one.
//!
//! ```
//! use memory_match::core::Position;
//! use memory_match::resolution::{Epoch, ResolutionKind, ResolutionQueue};
//!
//! let mut queue = ResolutionQueue::new();
//! let ticket = queue.schedule(Epoch::default(), Position::new(0), Position::new(5), ResolutionKind::Match, 500);
//!
//! assert!(queue.advance(499).is_empty());
//! let due = queue.advance(1);
//! assert_eq!(due.len(), 1);
//! assert_eq!(due[0].id, ticket.id);
//! ```

mod queue;

pub use queue::ResolutionQueue;

use serde::{Deserialize, Serialize};

use crate::core::Position;

/// Board generation. Bumped on every reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Epoch(pub u32);

impl Epoch {
    /// The epoch following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for Epoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Epoch({})", self.0)
    }
}

/// Unique identifier for a scheduled resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResolutionId(pub u64);

impl std::fmt::Display for ResolutionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Resolution({})", self.0)
    }
}

/// Outcome a pending pair resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolutionKind {
    /// Both cards become matched.
    Match,
    /// Both cards turn back face down.
    Mismatch,
}

impl ResolutionKind {
    /// Kind for a pair, by whether the keys are equal.
    #[must_use]
    pub const fn for_pair(matched: bool) -> Self {
        if matched {
            Self::Match
        } else {
            Self::Mismatch
        }
    }

    /// Whether this is a match.
    #[must_use]
    pub const fn is_match(self) -> bool {
        matches!(self, Self::Match)
    }
}

/// Handle returned to the host when a pair is scheduled.
///
/// Hosts with their own timers wait `delay_ms` and pass the ticket back to
/// the engine. Stale tickets are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolutionTicket {
    /// Scheduled entry.
    pub id: ResolutionId,
    /// Board the entry belongs to.
    pub epoch: Epoch,
    /// Delay from scheduling until the resolution is due.
    pub delay_ms: u64,
    /// Outcome the pair will resolve to.
    pub kind: ResolutionKind,
}

/// A scheduled pair resolution.
///
/// Snapshots the two positions at scheduling time; the engine checks them
/// against the live board before applying.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingResolution {
    pub id: ResolutionId,
    pub epoch: Epoch,
    pub first: Position,
    pub second: Position,
    pub kind: ResolutionKind,
    /// Virtual clock time at which this becomes due.
    pub due_at_ms: u64,
}

impl PendingResolution {
    /// Ticket describing this entry, relative to `now_ms`.
    #[must_use]
    pub fn ticket(&self, now_ms: u64) -> ResolutionTicket {
        ResolutionTicket {
            id: self.id,
            epoch: self.epoch,
            delay_ms: self.due_at_ms.saturating_sub(now_ms),
            kind: self.kind,
        }
    }

    /// The two positions of the pair.
    #[must_use]
    pub fn positions(&self) -> [Position; 2] {
        [self.first, self.second]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_next() {
        assert_eq!(Epoch::default().next(), Epoch(1));
        assert_eq!(Epoch(u32::MAX).next(), Epoch(0));
        assert_eq!(format!("{}", Epoch(3)), "Epoch(3)");
    }

    #[test]
    fn test_kind_for_pair() {
        assert_eq!(ResolutionKind::for_pair(true), ResolutionKind::Match);
        assert_eq!(ResolutionKind::for_pair(false), ResolutionKind::Mismatch);
        assert!(ResolutionKind::Match.is_match());
        assert!(!ResolutionKind::Mismatch.is_match());
    }

    #[test]
    fn test_ticket_delay() {
        let pending = PendingResolution {
            id: ResolutionId(1),
            epoch: Epoch(0),
            first: Position::new(0),
            second: Position::new(1),
            kind: ResolutionKind::Mismatch,
            due_at_ms: 1500,
        };

        assert_eq!(pending.ticket(500).delay_ms, 1000);
        assert_eq!(pending.ticket(2000).delay_ms, 0);
        assert_eq!(pending.positions(), [Position::new(0), Position::new(1)]);
    }
}
