//! Completion and best-score tracking.
//!
//! Runs after every pair resolution. The first time the board is fully
//! matched it applies the completion bonus, marks the session complete
//! and, when the record is beaten, persists the new best score.

use crate::core::GameConfig;
use crate::events::{EventLog, GameEvent};
use crate::store::ScoreStore;

use super::session::GameSession;

/// Result of a game reaching completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompletionReport {
    /// Moves taken.
    pub moves: u32,
    /// Bonus added on completion.
    pub bonus: u32,
    /// Score after the bonus.
    pub final_score: u32,
    /// Whether `final_score` beat the previous best.
    pub new_best: bool,
}

/// Check for completion and apply it once.
///
/// Returns `None` while cards remain unmatched or if completion was already
/// applied. A failing store write is logged; the in-memory best score is
/// still updated.
pub fn evaluate_completion<S: ScoreStore + ?Sized>(
    session: &mut GameSession,
    config: &GameConfig,
    store: &mut S,
    events: &mut EventLog,
) -> Option<CompletionReport> {
    if session.is_complete || !session.all_matched() {
        return None;
    }

    let moves = session.move_count;
    let bonus = config.completion_bonus(moves);
    let final_score = session.score.saturating_add(bonus);

    session.score = final_score;
    session.is_complete = true;
    events.push(GameEvent::GameCompleted {
        moves,
        bonus,
        final_score,
    });
    log::info!(
        "game complete in {} moves: bonus {}, final score {}",
        moves,
        bonus,
        final_score
    );

    let previous = session.best_score;
    let new_best = final_score > previous;
    if new_best {
        session.best_score = final_score;
        session.is_new_best_score = true;

        if let Err(err) = store.set(final_score) {
            log::warn!("failed to persist best score {}: {}", final_score, err);
        }
        events.push(GameEvent::NewBestScore {
            previous,
            score: final_score,
        });
        log::info!("new best score {} (was {})", final_score, previous);
    }

    Some(CompletionReport {
        moves,
        bonus,
        final_score,
        new_best,
    })
}
