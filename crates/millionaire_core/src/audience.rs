//! Simulated ask-the-audience poll.

use crate::question::OPTION_COUNT;
use crate::types::OptionLabel;
use serde::Serialize;
use tracing::{debug, instrument};

/// Share of the vote the correct option gets before any decay.
pub const BASE_PCT: u8 = 80;

/// Points the correct share loses per ladder level.
pub const DECAY_PER_LEVEL: u8 = 4;

/// The correct share never drops below this.
pub const FLOOR_PCT: u8 = 15;

/// Percentage of the audience voting for each option, A through D.
///
/// Shares always sum to exactly 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AudiencePoll {
    shares: [u8; OPTION_COUNT],
}

impl AudiencePoll {
    /// Correct-option share at a given level.
    pub fn correct_share(level: u8) -> u8 {
        let decay = u16::from(level) * u16::from(DECAY_PER_LEVEL);
        let share = u16::from(BASE_PCT).saturating_sub(decay);
        share.max(u16::from(FLOOR_PCT)) as u8
    }

    /// Builds the poll for a question at `level` whose answer is `correct_index`.
    #[instrument]
    pub fn simulate(level: u8, correct_index: usize) -> Self {
        let correct = Self::correct_share(level);
        let wrong_count = (OPTION_COUNT - 1) as u8;
        let remaining = 100 - correct;
        let even = remaining / wrong_count;
        let mut leftover = remaining % wrong_count;

        let mut shares = [0u8; OPTION_COUNT];
        for (index, share) in shares.iter_mut().enumerate() {
            if index == correct_index {
                *share = correct;
                continue;
            }
            *share = even;
            if leftover > 0 {
                *share += 1;
                leftover -= 1;
            }
        }

        debug!(?shares, "Audience poll simulated");
        Self { shares }
    }

    /// Shares in option order.
    pub fn shares(&self) -> [u8; OPTION_COUNT] {
        self.shares
    }

    /// Share for a single option.
    pub fn share(&self, label: OptionLabel) -> u8 {
        self.shares[label.index()]
    }
}
