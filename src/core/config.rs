//! Game configuration.
//!
//! Pacing constants and the deal seed. The delays are UI pacing, not
//! correctness constraints: any value (including zero) keeps the state
//! machine sound.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default pause between the second flip of a turn and its resolution.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(1000);

/// Default pause before a mismatched pair is turned back face-down.
pub const DEFAULT_REVERT_DELAY: Duration = Duration::from_millis(1000);

/// Match game configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Time both cards stay visible before the pair is evaluated.
    pub settle_delay: Duration,

    /// Time a mismatched pair stays visible before flipping back.
    pub revert_delay: Duration,

    /// Deal seed. `None` draws a fresh seed from OS entropy.
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
            revert_delay: DEFAULT_REVERT_DELAY,
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Set the settle delay.
    #[must_use]
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Set the mismatch revert delay.
    #[must_use]
    pub fn with_revert_delay(mut self, delay: Duration) -> Self {
        self.revert_delay = delay;
        self
    }

    /// Set a fixed deal seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
