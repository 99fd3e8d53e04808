//! The game state machine: `Active(level) → Won | Lost(level)`.

use crate::action::{AnswerOutcome, GameError, GameEvent, Transition};
use crate::audience::AudiencePoll;
use crate::question::{OPTION_COUNT, Question};
use crate::reward::{QUESTION_COUNT, RewardTable};
use crate::types::Lifeline;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info, instrument, warn};

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GameStatus {
    /// Questions are still being asked.
    Active,
    /// The final question was answered correctly.
    Won,
    /// A wrong answer ended the game at this level.
    Lost {
        /// Level of the failed question.
        level: u8,
    },
}

/// Information a spent lifeline revealed about the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "lifeline", rename_all = "snake_case")]
pub enum LifelineReveal {
    /// The friend's pick, which is always right.
    PhoneAFriend {
        /// Letter the friend names.
        suggestion: crate::types::OptionLabel,
    },
    /// The audience's vote.
    AskAudience {
        /// Percentages per option.
        poll: AudiencePoll,
    },
}

impl LifelineReveal {
    /// Which lifeline produced this reveal.
    pub fn lifeline(&self) -> Lifeline {
        match self {
            Self::PhoneAFriend { .. } => Lifeline::PhoneAFriend,
            Self::AskAudience { .. } => Lifeline::AskAudience,
        }
    }
}

/// One player's game.
///
/// Created at level 1 with both lifelines available. Only the methods
/// below mutate it, and each either succeeds or returns a [`GameError`]
/// leaving the state exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    current_level: u8,
    status: GameStatus,
    lifelines_used: BTreeSet<Lifeline>,
    question: Option<Question>,
    reveals: Vec<LifelineReveal>,
    rewards: RewardTable,
}

impl GameState {
    /// Creates a game at level 1.
    #[instrument]
    pub fn new() -> Self {
        Self::with_rewards(RewardTable::default())
    }

    /// Creates a game at level 1 with a custom prize ladder.
    #[instrument(skip(rewards))]
    pub fn with_rewards(rewards: RewardTable) -> Self {
        debug!("Creating game state");
        Self {
            current_level: 1,
            status: GameStatus::Active,
            lifelines_used: BTreeSet::new(),
            question: None,
            reveals: Vec::new(),
            rewards,
        }
    }

    /// Returns to level 1, restores both lifelines and drops any question.
    #[instrument(skip(self), fields(level = self.current_level, status = ?self.status))]
    pub fn reset(&mut self) {
        info!("Resetting game");
        *self = Self::with_rewards(self.rewards);
    }

    /// Level of the question being played (1-based).
    pub fn current_level(&self) -> u8 {
        self.current_level
    }

    /// Current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns true once the game is won or lost.
    pub fn is_over(&self) -> bool {
        !matches!(self.status, GameStatus::Active)
    }

    /// Returns true if the final question was answered correctly.
    pub fn is_won(&self) -> bool {
        matches!(self.status, GameStatus::Won)
    }

    /// Question loaded for the current level, if any.
    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    /// Lifeline payloads revealed for the current question.
    pub fn reveals(&self) -> &[LifelineReveal] {
        &self.reveals
    }

    /// The prize ladder.
    pub fn rewards(&self) -> &RewardTable {
        &self.rewards
    }

    /// Lifelines spent so far this game.
    pub fn lifelines_used(&self) -> &BTreeSet<Lifeline> {
        &self.lifelines_used
    }

    /// Returns true if `kind` can still be used right now.
    pub fn is_lifeline_available(&self, kind: Lifeline) -> bool {
        !self.is_over() && !self.lifelines_used.contains(&kind)
    }

    /// Returns true if the surface should ask the provider for a question.
    pub fn needs_question(&self) -> bool {
        !self.is_over() && self.question.is_none()
    }

    /// Caches a freshly generated question for the current level.
    #[instrument(skip(self, question), fields(level = self.current_level, question_level = *question.level()))]
    pub fn set_question(&mut self, question: Question) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if self.question.is_some() {
            debug!("Question already cached, discarding new one");
            return Err(GameError::QuestionAlreadyLoaded(self.current_level));
        }
        if *question.level() != self.current_level {
            warn!("Question generated for a stale level");
            return Err(GameError::QuestionLevelMismatch {
                question: *question.level(),
                current: self.current_level,
            });
        }

        debug!("Question cached");
        self.question = Some(question);
        Ok(())
    }

    /// Scores the player's pick for the current question.
    ///
    /// A correct answer advances one level (or wins on the last level) and
    /// drops the question and any reveals; lifeline usage is kept. A wrong
    /// answer loses the game at the current level.
    #[instrument(skip(self), fields(level = self.current_level))]
    pub fn submit_answer(&mut self, selected: usize) -> Result<AnswerOutcome, GameError> {
        if self.is_over() {
            warn!("Answer submitted after game end");
            return Err(GameError::GameOver);
        }
        let question = self.question.as_ref().ok_or_else(|| {
            warn!("Answer submitted with no question loaded");
            GameError::NoActiveQuestion
        })?;
        if selected >= OPTION_COUNT {
            warn!(selected, "Answer index out of range");
            return Err(GameError::OptionOutOfRange(selected));
        }

        let outcome = if question.is_correct(selected) {
            if self.current_level == QUESTION_COUNT {
                self.status = GameStatus::Won;
                info!("Final question answered correctly");
                AnswerOutcome::Won
            } else {
                self.current_level += 1;
                self.reveals.clear();
                info!(next_level = self.current_level, "Correct answer");
                AnswerOutcome::Correct {
                    next_level: self.current_level,
                }
            }
        } else {
            let correct = question.correct_label();
            self.status = GameStatus::Lost {
                level: self.current_level,
            };
            info!(%correct, "Wrong answer");
            AnswerOutcome::Wrong { correct }
        };

        self.question = None;
        Ok(outcome)
    }

    /// Spends a lifeline on the current question and returns what it revealed.
    #[instrument(skip(self), fields(level = self.current_level))]
    pub fn use_lifeline(&mut self, kind: Lifeline) -> Result<LifelineReveal, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if self.lifelines_used.contains(&kind) {
            warn!("Lifeline already used");
            return Err(GameError::LifelineAlreadyUsed(kind));
        }
        let question = self.question.as_ref().ok_or(GameError::NoActiveQuestion)?;

        let reveal = match kind {
            Lifeline::PhoneAFriend => LifelineReveal::PhoneAFriend {
                suggestion: question.correct_label(),
            },
            Lifeline::AskAudience => LifelineReveal::AskAudience {
                poll: AudiencePoll::simulate(self.current_level, *question.correct_index()),
            },
        };

        self.lifelines_used.insert(kind);
        self.reveals.push(reveal);
        info!(?reveal, "Lifeline used");
        Ok(reveal)
    }

    /// Prize the player leaves with, or `None` while the game is active.
    ///
    /// A win pays the top prize. A loss at level `L` pays the last milestone
    /// reached among the `L - 1` questions answered.
    #[instrument(skip(self), fields(status = ?self.status))]
    pub fn compute_reward(&self) -> Option<&'static str> {
        match self.status {
            GameStatus::Active => None,
            GameStatus::Won => Some(self.rewards.top_prize()),
            GameStatus::Lost { level } => Some(self.rewards.banked_for_loss(level)),
        }
    }

    /// Applies a player event.
    #[instrument(skip(self), fields(level = self.current_level))]
    pub fn handle(&mut self, event: GameEvent) -> Result<Transition, GameError> {
        debug!(?event, "Handling event");
        match event {
            GameEvent::Answer(selected) => {
                let outcome = self.submit_answer(selected)?;
                Ok(Transition::Answered { outcome })
            }
            GameEvent::UseLifeline(kind) => {
                let reveal = self.use_lifeline(kind)?;
                Ok(Transition::LifelineUsed { reveal })
            }
            GameEvent::Restart => {
                self.reset();
                Ok(Transition::Restarted)
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
