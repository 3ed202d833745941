//! In-process score store.

use std::cell::Cell;
use std::rc::Rc;

use super::{ScoreStore, StoreError};

/// Best score held in memory.
///
/// Clones share the same value, so a test can keep a handle to a store it
/// handed to the engine and observe writes.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    value: Rc<Cell<Option<u32>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding a score.
    #[must_use]
    pub fn with_score(score: u32) -> Self {
        Self {
            value: Rc::new(Cell::new(Some(score))),
        }
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self) -> Option<u32> {
        self.value.get()
    }

    fn set(&mut self, score: u32) -> Result<(), StoreError> {
        self.value.set(Some(score));
        Ok(())
    }
}
