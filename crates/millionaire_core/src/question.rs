//! Validated multiple-choice question record.

use crate::reward::QUESTION_COUNT;
use crate::types::OptionLabel;
use derive_getters::Getters;
use serde::Serialize;
use tracing::{debug, instrument, warn};

/// Number of answer options every question carries.
pub const OPTION_COUNT: usize = 4;

/// Reasons a candidate question is rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum QuestionError {
    /// Level is outside the ladder.
    #[display("Level {} is outside 1..={}", _0, QUESTION_COUNT)]
    LevelOutOfRange(u8),

    /// Prompt text is empty.
    #[display("Question text is empty")]
    EmptyPrompt,

    /// Wrong number of options.
    #[display("Expected {} options, got {}", OPTION_COUNT, _0)]
    WrongOptionCount(usize),

    /// One of the options is blank.
    #[display("Option {} is empty", _0)]
    EmptyOption(OptionLabel),

    /// Correct index does not name one of the four options.
    #[display("Answer index {} is outside 0..={}", _0, OPTION_COUNT - 1)]
    AnswerOutOfRange(i64),
}

impl std::error::Error for QuestionError {}

/// A question for one level of the ladder.
///
/// Only constructible through [`Question::new`], so every instance has
/// exactly four non-empty options and an in-range correct index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct Question {
    /// Ladder level this question was generated for.
    level: u8,
    /// Question text.
    prompt: String,
    /// The four answer options, A through D.
    options: [String; OPTION_COUNT],
    /// Index of the correct option.
    correct_index: usize,
}

impl Question {
    /// Validates and builds a question.
    #[instrument(skip(prompt, options), fields(option_count = options.len()))]
    pub fn new(
        level: u8,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_index: i64,
    ) -> Result<Self, QuestionError> {
        if !(1..=QUESTION_COUNT).contains(&level) {
            warn!(level, "Question level out of range");
            return Err(QuestionError::LevelOutOfRange(level));
        }

        let prompt = prompt.into().trim().to_string();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        let options: [String; OPTION_COUNT] = options
            .into_iter()
            .map(|o| o.trim().to_string())
            .collect::<Vec<_>>()
            .try_into()
            .map_err(|v: Vec<String>| QuestionError::WrongOptionCount(v.len()))?;

        if let Some(blank) = options.iter().position(|o| o.is_empty()) {
            let label = OptionLabel::from_index(blank).unwrap_or(OptionLabel::A);
            return Err(QuestionError::EmptyOption(label));
        }

        let correct_index = usize::try_from(correct_index)
            .ok()
            .filter(|i| *i < OPTION_COUNT)
            .ok_or(QuestionError::AnswerOutOfRange(correct_index))?;

        debug!(level, correct_index, "Question validated");
        Ok(Self {
            level,
            prompt,
            options,
            correct_index,
        })
    }

    /// Letter of the correct option.
    pub fn correct_label(&self) -> OptionLabel {
        OptionLabel::from_index(self.correct_index).unwrap_or(OptionLabel::A)
    }

    /// Returns true if `selected` is the correct option.
    pub fn is_correct(&self, selected: usize) -> bool {
        selected == self.correct_index
    }
}
