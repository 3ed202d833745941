//! Card system: catalog, card instances, deck building.
//!
//! ## Key Types
//!
//! - `MatchKey`: Pairing key shared by the two cards of a pair
//! - `CatalogEntry`: Static pair type (key, display text, special flag)
//! - `Catalog`: Validated set of distinct entries
//! - `Card`: Runtime card state (position, flipped, matched)
//! - `build_deck`: Shuffled board with two cards per entry

pub mod catalog;
pub mod card;
pub mod deck;

pub use catalog::{Catalog, CatalogEntry, CatalogError, MatchKey};
pub use card::Card;
pub use deck::build_deck;
