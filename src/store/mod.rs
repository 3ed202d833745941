//! Best-score persistence.
//!
//! The engine never touches storage directly: it is handed a `ScoreStore`
//! capability at construction. Stores hold a single integer under a fixed
//! key and report absent or malformed values as `None`.
//!
//! - [`MemoryStore`]: in-process value, for tests and hosts that persist
//!   elsewhere
//! - [`FileStore`]: JSON object file of key to base-10 string, the same
//!   shape as browser local storage

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Errors raised while writing the best score.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("score store contents are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persistence capability for the best score.
pub trait ScoreStore {
    /// Read the stored best score.
    ///
    /// Returns `None` when nothing is stored or the stored value is not a
    /// non-negative base-10 integer.
    fn get(&self) -> Option<u32>;

    /// Persist a new best score.
    fn set(&mut self, score: u32) -> Result<(), StoreError>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn get(&self) -> Option<u32> {
        (**self).get()
    }

    fn set(&mut self, score: u32) -> Result<(), StoreError> {
        (**self).set(score)
    }
}

/// Parse a persisted score string.
///
/// Surrounding whitespace is tolerated. Anything but ASCII digits, including
/// a sign, is treated as absent.
#[must_use]
pub fn parse_score(raw: &str) -> Option<u32> {
    let digits = raw.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        log::warn!("ignoring malformed stored best score {:?}", raw);
        return None;
    }

    match digits.parse::<u32>() {
        Ok(score) => Some(score),
        Err(err) => {
            log::warn!("ignoring malformed stored best score {:?}: {}", raw, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("104"), Some(104));
        assert_eq!(parse_score(" 42\n"), Some(42));
        assert_eq!(parse_score("0"), Some(0));
    }

    #[test]
    fn test_parse_score_malformed() {
        assert_eq!(parse_score(""), None);
        assert_eq!(parse_score("abc"), None);
        assert_eq!(parse_score("-5"), None);
        assert_eq!(parse_score("+5"), None);
        assert_eq!(parse_score("5 5"), None);
        assert_eq!(parse_score("12.5"), None);
        assert_eq!(parse_score("99999999999"), None);
    }

    #[test]
    fn test_boxed_store() {
        let mut store: Box<dyn ScoreStore> = Box::new(MemoryStore::new());
        assert_eq!(store.get(), None);

        store.set(7).unwrap();
        assert_eq!(store.get(), Some(7));
    }
}
