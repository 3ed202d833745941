//! Virtual-clock resolution queue.

use serde::{Deserialize, Serialize};

use crate::core::Position;

use super::{Epoch, PendingResolution, ResolutionId, ResolutionKind, ResolutionTicket};

/// Pending resolutions ordered by due time.
///
/// ## Behavior
///
/// - `schedule()`: Adds an entry due `delay_ms` after the current clock
/// - `advance()`: Moves the clock, returns entries that came due
/// - `take()`: Removes one entry regardless of the clock
/// - `drain()`: Removes everything, in due order
/// - `clear()`: Drops everything (used on reset)
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ResolutionQueue {
    /// Virtual clock.
    now_ms: u64,

    /// Entries sorted by (due time, id).
    pending: Vec<PendingResolution>,

    /// Next entry id.
    next_id: u64,
}

impl ResolutionQueue {
    /// Create an empty queue at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual clock.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of pending entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Time the earliest entry becomes due, if any.
    #[must_use]
    pub fn next_due_ms(&self) -> Option<u64> {
        self.pending.first().map(|p| p.due_at_ms)
    }

    /// Iterate over pending entries in due order.
    pub fn iter(&self) -> impl Iterator<Item = &PendingResolution> {
        self.pending.iter()
    }

    /// Schedule a pair resolution.
    pub fn schedule(
        &mut self,
        epoch: Epoch,
        first: Position,
        second: Position,
        kind: ResolutionKind,
        delay_ms: u64,
    ) -> ResolutionTicket {
        let id = ResolutionId(self.next_id);
        self.next_id += 1;

        let entry = PendingResolution {
            id,
            epoch,
            first,
            second,
            kind,
            due_at_ms: self.now_ms.saturating_add(delay_ms),
        };
        let ticket = entry.ticket(self.now_ms);

        let index = self
            .pending
            .partition_point(|p| (p.due_at_ms, p.id) <= (entry.due_at_ms, entry.id));
        self.pending.insert(index, entry);

        ticket
    }

    /// Advance the clock and remove every entry now due.
    ///
    /// Returned entries are in due order.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<PendingResolution> {
        self.now_ms = self.now_ms.saturating_add(elapsed_ms);
        let due = self.pending.partition_point(|p| p.due_at_ms <= self.now_ms);
        self.pending.drain(..due).collect()
    }

    /// Remove a specific entry, due or not.
    pub fn take(&mut self, id: ResolutionId) -> Option<PendingResolution> {
        let index = self.pending.iter().position(|p| p.id == id)?;
        Some(self.pending.remove(index))
    }

    /// Remove every entry, moving the clock to the last due time.
    pub fn drain(&mut self) -> Vec<PendingResolution> {
        if let Some(last) = self.pending.last() {
            self.now_ms = self.now_ms.max(last.due_at_ms);
        }
        std::mem::take(&mut self.pending)
    }

    /// Drop every entry without applying it.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
