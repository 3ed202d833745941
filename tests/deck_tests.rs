//! Deck builder tests.
//!
//! These tests verify every dealt board, for any seed and catalog:
//! - Holds exactly two cards per match key
//! - Numbers positions contiguously from 0 in board order
//! - Starts face down and unmatched

use proptest::prelude::*;
use rustc_hash::FxHashMap;

use memory_match::cards::{build_deck, Catalog, CatalogEntry, MatchKey};
use memory_match::core::GameRng;

fn key_counts(catalog: &Catalog, seed: u64) -> FxHashMap<MatchKey, usize> {
    let mut counts = FxHashMap::default();
    for card in &build_deck(catalog, &mut GameRng::new(seed)) {
        *counts.entry(card.content.match_key.clone()).or_insert(0) += 1;
    }
    counts
}

fn catalog_of(size: usize) -> Catalog {
    let entries = (0..size)
        .map(|i| CatalogEntry::new(format!("key-{}", i), format!("CARD {}", i)))
        .collect();
    Catalog::new(entries).unwrap()
}

proptest! {
    /// Every key of the standard catalog appears exactly twice.
    #[test]
    fn prop_two_cards_per_key(seed in any::<u64>()) {
        let catalog = Catalog::standard();
        let counts = key_counts(&catalog, seed);

        prop_assert_eq!(counts.len(), catalog.len());
        for entry in catalog.iter() {
            prop_assert_eq!(counts.get(&entry.match_key).copied(), Some(2));
        }
    }

    /// Positions are unique and contiguous from 0, matching board order.
    #[test]
    fn prop_positions_contiguous(seed in any::<u64>(), size in 1usize..12) {
        let catalog = catalog_of(size);
        let deck = build_deck(&catalog, &mut GameRng::new(seed));

        prop_assert_eq!(deck.len(), size * 2);
        for (index, card) in deck.iter().enumerate() {
            prop_assert_eq!(card.position.index(), index);
            prop_assert!(!card.is_flipped);
            prop_assert!(!card.is_matched);
        }
    }

    /// Custom catalogs of any size still deal pairs.
    #[test]
    fn prop_custom_catalog_pairs(seed in any::<u64>(), size in 1usize..12) {
        let counts = key_counts(&catalog_of(size), seed);

        prop_assert_eq!(counts.len(), size);
        prop_assert!(counts.values().all(|&n| n == 2));
    }
}

/// The special logo entry is dealt like any other pair.
#[test]
fn test_special_cards_dealt_in_pairs() {
    let deck = build_deck(&Catalog::standard(), &mut GameRng::new(42));
    let specials: Vec<_> = deck.iter().filter(|c| c.content.is_special).collect();

    assert_eq!(specials.len(), 2);
    assert!(specials[0].pairs_with(specials[1]));
    assert_eq!(specials[0].content.display_text, "LOGO CLUB VEA");
}

/// Every slot of the board sees every key across many deals.
///
/// A uniform shuffle puts each key in each slot a quarter of the time; over
/// 4000 deals every (slot, key) combination is expected ~1000 times.
#[test]
fn test_shuffle_covers_every_slot() {
    let catalog = Catalog::standard();
    let mut rng = GameRng::new(2024);
    let mut seen: FxHashMap<(usize, MatchKey), usize> = FxHashMap::default();

    for _ in 0..4000 {
        for (slot, card) in build_deck(&catalog, &mut rng).iter().enumerate() {
            *seen.entry((slot, card.content.match_key.clone())).or_insert(0) += 1;
        }
    }

    assert_eq!(seen.len(), 8 * 4);
    for (&(slot, ref key), &count) in &seen {
        assert!(
            (800..1200).contains(&count),
            "slot {} got {} {} times",
            slot,
            key,
            count
        );
    }
}
