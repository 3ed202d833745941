//! Card content catalog.
//!
//! A `CatalogEntry` is one pair type: the text shown when a card is face up
//! and the key two cards must share to match. The `Catalog` holds the
//! distinct entries a deck is dealt from.
//!
//! ## Example
//!
//! ```
//! use memory_match::cards::{Catalog, CatalogEntry};
//!
//! let catalog = Catalog::new(vec![
//!     CatalogEntry::new("sun", "SUN"),
//!     CatalogEntry::new("moon", "MOON").special(),
//! ])
//! .unwrap();
//!
//! assert_eq!(catalog.len(), 2);
//! assert!(catalog.get("moon").unwrap().is_special);
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Key two cards must share to form a pair.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchKey(pub String);

impl MatchKey {
    /// Create a new match key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MatchKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl std::fmt::Display for MatchKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One pair type of the catalog.
///
/// Immutable once built. `is_special` marks entries the view layer renders
/// differently (the logo card in the default catalog).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Pairing key.
    pub match_key: MatchKey,

    /// Text shown on the face of the card.
    pub display_text: String,

    /// Rendered as a special card.
    pub is_special: bool,
}

impl CatalogEntry {
    /// Create a regular entry.
    #[must_use]
    pub fn new(match_key: impl Into<String>, display_text: impl Into<String>) -> Self {
        Self {
            match_key: MatchKey::new(match_key),
            display_text: display_text.into(),
            is_special: false,
        }
    }

    /// Mark this entry as special (builder pattern).
    #[must_use]
    pub fn special(mut self) -> Self {
        self.is_special = true;
        self
    }

    /// Check if two entries form a pair.
    #[must_use]
    pub fn matches(&self, other: &CatalogEntry) -> bool {
        self.match_key == other.match_key
    }
}

/// Errors raised when building a custom catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog has no entries")]
    Empty,

    #[error("match key `{0}` appears more than once")]
    DuplicateKey(MatchKey),
}

/// Ordered set of distinct catalog entries.
///
/// Entry order is the order cards are laid out before shuffling.
#[derive(Clone, Debug)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_key: FxHashMap<MatchKey, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting empty input and duplicate keys.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut by_key = FxHashMap::default();
        for (index, entry) in entries.iter().enumerate() {
            if by_key.insert(entry.match_key.clone(), index).is_some() {
                return Err(CatalogError::DuplicateKey(entry.match_key.clone()));
            }
        }

        Ok(Self { entries, by_key })
    }

    /// The four-entry catalog of the standard game.
    #[must_use]
    pub fn standard() -> Self {
        let entries = vec![
            CatalogEntry::new("logo", "LOGO CLUB VEA").special(),
            CatalogEntry::new("sirah", "SIRAH"),
            CatalogEntry::new("cabernet", "CABERNET"),
            CatalogEntry::new("malbec", "MALBEC"),
        ];
        let by_key = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (entry.match_key.clone(), index))
            .collect();

        Self { entries, by_key }
    }

    /// Look up an entry by match key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.by_key
            .get(&MatchKey::from(key))
            .map(|&index| &self.entries[index])
    }

    /// Check if a key is in the catalog.
    #[must_use]
    pub fn contains(&self, key: &MatchKey) -> bool {
        self.by_key.contains_key(key)
    }

    /// Number of distinct entries (pairs on the board).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed catalog; kept for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of cards a deck dealt from this catalog holds.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.entries.len() * 2
    }

    /// Iterate over entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
