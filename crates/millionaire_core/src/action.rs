//! Player events and the results of applying them.
//!
//! Events are plain data: the surface builds one per user action and hands
//! it to [`GameState::handle`](crate::GameState::handle), which either
//! applies it or rejects it without touching state.

use crate::game::LifelineReveal;
use crate::types::{Lifeline, OptionLabel};
use serde::{Deserialize, Serialize};

/// Something the player did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum GameEvent {
    /// Picked the option at this index (0-3).
    Answer(usize),
    /// Spent a lifeline.
    UseLifeline(Lifeline),
    /// Started over from level 1.
    Restart,
}

/// Result of a submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum AnswerOutcome {
    /// Correct, and the ladder continues.
    Correct {
        /// Level of the next question.
        next_level: u8,
    },
    /// Correct on the final question.
    Won,
    /// Wrong answer; the game is over.
    Wrong {
        /// The option that was right.
        correct: OptionLabel,
    },
}

/// What an applied event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    /// An answer was scored.
    Answered {
        /// How it went.
        outcome: AnswerOutcome,
    },
    /// A lifeline was spent.
    LifelineUsed {
        /// What it revealed.
        reveal: LifelineReveal,
    },
    /// The game was reset to level 1.
    Restarted,
}

/// A rejected game operation. State is unchanged whenever one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// The game has already been won or lost.
    #[display("Game is already over")]
    GameOver,

    /// No question is loaded for the current level.
    #[display("No question loaded for the current level")]
    NoActiveQuestion,

    /// A question is already loaded for the current level.
    #[display("A question is already loaded for level {}", _0)]
    QuestionAlreadyLoaded(u8),

    /// The supplied question was generated for another level.
    #[display("Question is for level {} but the game is at level {}", question, current)]
    QuestionLevelMismatch {
        /// Level the question belongs to.
        question: u8,
        /// Level the game is at.
        current: u8,
    },

    /// Selected option index is not 0-3.
    #[display("Option index {} is outside 0..=3", _0)]
    OptionOutOfRange(usize),

    /// Lifeline was already spent this game.
    #[display("Lifeline {} has already been used", _0)]
    LifelineAlreadyUsed(Lifeline),
}

impl std::error::Error for GameError {}

impl AnswerOutcome {
    /// Returns true unless the answer was wrong.
    pub fn is_correct(&self) -> bool {
        !matches!(self, Self::Wrong { .. })
    }
}
