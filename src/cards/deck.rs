//! Deck building.
//!
//! Deals two cards per catalog entry, shuffles the contents with
//! Fisher–Yates and assigns positions in board order, so a card's position
//! is always its index on the board.

use im::Vector;

use super::card::Card;
use super::catalog::{Catalog, CatalogEntry};
use crate::core::{GameRng, Position};

/// Build a freshly shuffled board from a catalog.
///
/// Returns `2 * catalog.len()` face-down cards with positions
/// `0..2 * catalog.len()`.
///
/// ```
/// use memory_match::cards::{build_deck, Catalog};
/// use memory_match::core::GameRng;
///
/// let catalog = Catalog::standard();
/// let deck = build_deck(&catalog, &mut GameRng::new(42));
///
/// assert_eq!(deck.len(), 8);
/// assert!(deck.iter().all(|card| !card.is_flipped && !card.is_matched));
/// ```
#[must_use]
pub fn build_deck(catalog: &Catalog, rng: &mut GameRng) -> Vector<Card> {
    let mut contents: Vec<&CatalogEntry> = catalog.iter().chain(catalog.iter()).collect();
    rng.shuffle(&mut contents);

    contents
        .into_iter()
        .zip(Position::all(catalog.deck_size()))
        .map(|(content, position)| Card::new(position, content.clone()))
        .collect()
}
