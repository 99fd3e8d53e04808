//! Prize ladder and milestone arithmetic.

use tracing::instrument;

/// Number of questions in a full game.
pub const QUESTION_COUNT: u8 = 15;

/// Every this many levels a prize is banked.
pub const MILESTONE_INTERVAL: u8 = 5;

const DEFAULT_LABELS: [&str; QUESTION_COUNT as usize + 1] = [
    "0",
    "200.000",
    "400.000",
    "600.000",
    "1.000.000",
    "2.000.000",
    "3.000.000",
    "6.000.000",
    "10.000.000",
    "22.000.000",
    "30.000.000",
    "40.000.000",
    "60.000.000",
    "85.000.000",
    "150.000.000",
    "250.000.000",
];

/// Static prize labels indexed `0..=QUESTION_COUNT`.
///
/// Index 0 is the zero prize, index `level` is what answering question
/// `level` correctly is worth, and the last index is the top prize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardTable {
    labels: [&'static str; QUESTION_COUNT as usize + 1],
}

impl RewardTable {
    /// Returns the prize label for a ladder index, clamped to the top prize.
    pub fn prize(&self, level: u8) -> &'static str {
        let index = usize::from(level.min(QUESTION_COUNT));
        self.labels[index]
    }

    /// Returns the jackpot label.
    pub fn top_prize(&self) -> &'static str {
        self.labels[usize::from(QUESTION_COUNT)]
    }

    /// Returns true if reaching `level` banks a guaranteed prize.
    pub fn is_milestone(level: u8) -> bool {
        level != 0 && level % MILESTONE_INTERVAL == 0
    }

    /// Prize kept by a player who fails the question at `level`.
    ///
    /// Counts only the questions already answered (`level - 1`) and rounds
    /// down to the last milestone.
    #[instrument]
    pub fn banked_for_loss(&self, level: u8) -> &'static str {
        let answered = level.saturating_sub(1);
        let banked = (answered / MILESTONE_INTERVAL) * MILESTONE_INTERVAL;
        self.prize(banked)
    }

    /// Iterates the labels from index 0 upward.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.labels.iter().copied()
    }
}

impl Default for RewardTable {
    fn default() -> Self {
        Self {
            labels: DEFAULT_LABELS,
        }
    }
}
