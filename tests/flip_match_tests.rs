//! Flip/match controller tests.
//!
//! These tests verify the two-card selection rule and deferred resolution:
//! - Disallowed selections never change the session
//! - Matches and mismatches resolve after their delays
//! - Resets discard in-flight resolutions

use proptest::prelude::*;
use rustc_hash::FxHashMap;

use memory_match::{
    GameConfig, GameEvent, IgnoreReason, MatchKey, MemoryGame, MemoryStore, Position,
    ResolutionKind, SelectOutcome,
};

fn new_game(seed: u64) -> MemoryGame<MemoryStore> {
    MemoryGame::standard(GameConfig::default().with_seed(seed), MemoryStore::new())
}

/// Position pairs sharing a key, for every unmatched pair on the board.
fn unmatched_pairs(game: &MemoryGame<MemoryStore>) -> Vec<(Position, Position)> {
    let mut by_key: FxHashMap<MatchKey, Vec<Position>> = FxHashMap::default();
    for card in game.cards().filter(|c| !c.is_matched) {
        by_key
            .entry(card.content.match_key.clone())
            .or_default()
            .push(card.position);
    }
    let mut pairs: Vec<_> = by_key.into_values().map(|p| (p[0], p[1])).collect();
    pairs.sort();
    pairs
}

/// Two unmatched cards with different keys.
fn mismatched_pair(game: &MemoryGame<MemoryStore>) -> (Position, Position) {
    let pairs = unmatched_pairs(game);
    (pairs[0].0, pairs[1].0)
}

// =============================================================================
// Matches
// =============================================================================

/// Equal keys resolve to matched after 500ms and score 10.
#[test]
fn test_match_after_delay() {
    let mut game = new_game(1);
    let (a, b) = unmatched_pairs(&game)[0];

    assert_eq!(game.select(a), SelectOutcome::Flipped);
    let outcome = game.select(b);
    assert!(matches!(
        outcome,
        SelectOutcome::Pending(t) if t.kind == ResolutionKind::Match && t.delay_ms == 500
    ));

    // Move counted before resolution
    assert_eq!(game.move_count(), 1);
    assert_eq!(game.score(), 0);

    game.advance(499);
    assert!(!game.card(a).unwrap().is_matched);
    assert_eq!(game.selected().len(), 2);

    game.advance(1);
    assert!(game.card(a).unwrap().is_matched);
    assert!(game.card(b).unwrap().is_matched);
    assert!(game.selected().is_empty());
    assert_eq!(game.score(), 10);
}

/// Every pair on the board matches the same way.
#[test]
fn test_all_pairs_match() {
    let mut game = new_game(2);

    for (expected_score, (a, b)) in (1u32..).map(|n| n * 10).zip(unmatched_pairs(&game)) {
        game.select(a);
        game.select(b);
        game.advance(500);
        assert_eq!(game.session().matched_pairs() * 10, expected_score as usize);
    }
    assert!(game.cards().all(|c| c.is_matched));
}

// =============================================================================
// Mismatches
// =============================================================================

/// Differing keys flip back after 1000ms, score floored at 0.
#[test]
fn test_mismatch_at_zero_stays_zero() {
    let mut game = new_game(3);
    let (a, b) = mismatched_pair(&game);

    game.select(a);
    let outcome = game.select(b);
    assert!(matches!(
        outcome,
        SelectOutcome::Pending(t) if t.kind == ResolutionKind::Mismatch && t.delay_ms == 1000
    ));

    game.advance(500);
    assert!(game.card(a).unwrap().is_flipped);
    assert!(game.card(b).unwrap().is_flipped);

    game.advance(500);
    assert!(!game.card(a).unwrap().is_flipped);
    assert!(!game.card(b).unwrap().is_flipped);
    assert_eq!(game.score(), 0);
    assert_eq!(game.move_count(), 1);
}

/// A mismatch after a match costs one point.
#[test]
fn test_mismatch_decrements() {
    let mut game = new_game(4);
    let (a, b) = unmatched_pairs(&game)[0];
    game.select(a);
    game.select(b);
    game.flush();
    assert_eq!(game.score(), 10);

    let (c, d) = mismatched_pair(&game);
    game.select(c);
    game.select(d);
    game.flush();

    assert_eq!(game.score(), 9);
    assert_eq!(game.move_count(), 2);
    assert!(!game.card(c).unwrap().is_face_up());
}

/// Mismatched cards can be selected again once resolved.
#[test]
fn test_mismatched_cards_selectable_again() {
    let mut game = new_game(5);
    let (a, b) = mismatched_pair(&game);
    game.select(a);
    game.select(b);
    game.advance(1000);

    assert_eq!(game.select(a), SelectOutcome::Flipped);
}

// =============================================================================
// Ignored selections
// =============================================================================

/// A third card while two are pending changes nothing.
#[test]
fn test_third_card_ignored() {
    let mut game = new_game(6);
    let (a, b) = mismatched_pair(&game);
    let third = game
        .cards()
        .find(|c| c.position != a && c.position != b)
        .unwrap()
        .position;

    game.select(a);
    game.select(b);
    let before = game.session().clone();

    assert_eq!(
        game.select(third),
        SelectOutcome::Ignored(IgnoreReason::PairPending)
    );
    assert_eq!(game.session(), &before);
}

/// Re-selecting a flipped or matched card changes nothing.
#[test]
fn test_flipped_and_matched_ignored() {
    let mut game = new_game(7);
    let (a, b) = unmatched_pairs(&game)[0];

    game.select(a);
    let before = game.session().clone();
    assert_eq!(
        game.select(a),
        SelectOutcome::Ignored(IgnoreReason::AlreadyFlipped)
    );
    assert_eq!(game.session(), &before);

    game.select(b);
    game.flush();
    let before = game.session().clone();
    assert_eq!(
        game.select(b),
        SelectOutcome::Ignored(IgnoreReason::AlreadyMatched)
    );
    assert_eq!(game.session(), &before);
}

/// Positions off the board are ignored.
#[test]
fn test_off_board_ignored() {
    let mut game = new_game(8);
    let before = game.session().clone();

    assert_eq!(
        game.select(Position::new(8)),
        SelectOutcome::Ignored(IgnoreReason::OffBoard)
    );
    assert_eq!(game.session(), &before);
    assert!(game.drain_events().is_empty());
}

// =============================================================================
// Host timers and resets
// =============================================================================

/// A host timer firing a ticket resolves the pair without the clock.
#[test]
fn test_host_timer_ticket() {
    let mut game = new_game(9);
    let (a, b) = mismatched_pair(&game);
    game.select(a);
    let SelectOutcome::Pending(ticket) = game.select(b) else {
        panic!("expected pending resolution");
    };

    assert!(game.resolve(ticket));
    assert!(!game.card(a).unwrap().is_flipped);
    assert_eq!(game.now_ms(), 0);

    // Firing twice is harmless
    assert!(!game.resolve(ticket));
    assert_eq!(game.move_count(), 1);
}

/// A reset during the delay discards the pending resolution.
#[test]
fn test_reset_mid_resolution() {
    let mut game = MemoryGame::standard(
        GameConfig::default().with_seed(10),
        MemoryStore::with_score(60),
    );
    let (a, b) = unmatched_pairs(&game)[0];
    game.select(a);
    let SelectOutcome::Pending(ticket) = game.select(b) else {
        panic!("expected pending resolution");
    };

    game.reset();

    assert!(!game.resolve(ticket));
    assert_eq!(game.advance(5000), 0);
    assert_eq!(game.move_count(), 0);
    assert_eq!(game.score(), 0);
    assert_eq!(game.best_score(), 60);
    assert!(game.cards().all(|c| !c.is_flipped && !c.is_matched));
    assert!(game.selected().is_empty());
}

/// Events follow the order of play.
#[test]
fn test_event_feed() {
    let mut game = new_game(11);
    let (a, b) = mismatched_pair(&game);
    game.select(a);
    game.select(b);
    game.advance(1000);
    game.reset();

    let events = game.drain_events();
    assert_eq!(
        events,
        vec![
            GameEvent::CardFlipped { position: a },
            GameEvent::CardFlipped { position: b },
            GameEvent::PairMismatched {
                first: a,
                second: b,
                score: 0
            },
            GameEvent::GameReset,
        ]
    );
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Random clicking and waiting never breaks the session invariants.
    #[test]
    fn prop_random_play_invariants(
        seed in any::<u64>(),
        steps in prop::collection::vec((0u32..10, 0u64..1200), 0..80),
    ) {
        let mut game = new_game(seed);
        let mut completions = 0;

        for (click, wait) in steps {
            let before = game.session().clone();
            let outcome = game.select(Position::new(click));
            if !outcome.is_accepted() {
                prop_assert_eq!(game.session(), &before);
            }

            game.advance(wait);

            let session = game.session();
            prop_assert!(session.selected().len() <= 2);

            let pending = usize::from(session.pair_pending());
            prop_assert_eq!(session.move_count() as usize, session.history().len() + pending);

            // Matched cards come in complete pairs of equal keys
            let mut matched: FxHashMap<MatchKey, usize> = FxHashMap::default();
            for card in game.cards().filter(|c| c.is_matched) {
                *matched.entry(card.content.match_key.clone()).or_insert(0) += 1;
            }
            prop_assert!(matched.values().all(|&n| n == 2));

            // Face-up unmatched cards are exactly the selection
            let flipped: Vec<_> = game
                .cards()
                .filter(|c| c.is_flipped && !c.is_matched)
                .map(|c| c.position)
                .collect();
            let mut selected = session.selected().to_vec();
            selected.sort();
            prop_assert_eq!(flipped, selected);

            completions += game
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::GameCompleted { .. }))
                .count();
        }

        prop_assert!(completions <= 1);
        prop_assert_eq!(completions == 1, game.is_complete());
    }
}
