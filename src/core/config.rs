//! Engine configuration.
//!
//! `GameConfig` carries the timing, scoring and persistence constants of a
//! game. The defaults reproduce the standard rules:
//! - 500ms before a matched pair is confirmed, 1000ms before a mismatch hides
//! - +10 per match, -1 per mismatch (never below zero)
//! - completion bonus `max(50 - moves * 2, 10)`
//!
//! ```
//! use memory_match::core::GameConfig;
//!
//! let config = GameConfig::default()
//!     .with_seed(7)
//!     .with_mismatch_delay_ms(600);
//!
//! assert_eq!(config.match_delay_ms, 500);
//! assert_eq!(config.mismatch_delay_ms, 600);
//! assert_eq!(config.completion_bonus(8), 34);
//! ```

use serde::{Deserialize, Serialize};

/// Storage key of the persisted best score.
pub const DEFAULT_BEST_SCORE_KEY: &str = "memoryGameBestScore";

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Delay before a matched pair is confirmed.
    pub match_delay_ms: u64,

    /// Delay before a mismatched pair is turned back face down.
    pub mismatch_delay_ms: u64,

    /// Points awarded per matched pair.
    pub match_points: u32,

    /// Points taken per mismatch. Score saturates at zero.
    pub mismatch_penalty: u32,

    /// Completion bonus before the per-move deduction.
    pub bonus_base: u32,

    /// Completion bonus deducted per move.
    pub bonus_per_move: u32,

    /// Minimum completion bonus.
    pub bonus_floor: u32,

    /// Key under which the best score is persisted. Stores built with
    /// `FileStore::for_config` use it.
    pub best_score_key: String,

    /// Shuffle seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            match_delay_ms: 500,
            mismatch_delay_ms: 1000,
            match_points: 10,
            mismatch_penalty: 1,
            bonus_base: 50,
            bonus_per_move: 2,
            bonus_floor: 10,
            best_score_key: DEFAULT_BEST_SCORE_KEY.to_string(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the match confirmation delay.
    #[must_use]
    pub fn with_match_delay_ms(mut self, delay: u64) -> Self {
        self.match_delay_ms = delay;
        self
    }

    /// Set the mismatch reveal delay.
    #[must_use]
    pub fn with_mismatch_delay_ms(mut self, delay: u64) -> Self {
        self.mismatch_delay_ms = delay;
        self
    }

    /// Set points per match and penalty per mismatch.
    #[must_use]
    pub fn with_scoring(mut self, match_points: u32, mismatch_penalty: u32) -> Self {
        self.match_points = match_points;
        self.mismatch_penalty = mismatch_penalty;
        self
    }

    /// Set the completion bonus formula.
    #[must_use]
    pub fn with_bonus(mut self, base: u32, per_move: u32, floor: u32) -> Self {
        self.bonus_base = base;
        self.bonus_per_move = per_move;
        self.bonus_floor = floor;
        self
    }

    /// Set the persisted best score key.
    #[must_use]
    pub fn with_best_score_key(mut self, key: impl Into<String>) -> Self {
        self.best_score_key = key.into();
        self
    }

    /// Fix the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Completion bonus for a game finished in `moves` moves.
    ///
    /// `max(bonus_base - moves * bonus_per_move, bonus_floor)`, computed
    /// without underflow.
    #[must_use]
    pub fn completion_bonus(&self, moves: u32) -> u32 {
        self.bonus_base
            .saturating_sub(moves.saturating_mul(self.bonus_per_move))
            .max(self.bonus_floor)
    }

    /// Resolution delay for a pair, by outcome.
    #[must_use]
    pub fn resolution_delay_ms(&self, matched: bool) -> u64 {
        if matched {
            self.match_delay_ms
        } else {
            self.mismatch_delay_ms
        }
    }
}
