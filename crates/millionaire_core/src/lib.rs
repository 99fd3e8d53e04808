//! Pure game logic for the millionaire quiz.
//!
//! The crate owns everything that can be decided without I/O:
//!
//! - **Reward ladder**: fifteen questions, sixteen prize labels, milestones every five levels
//! - **Questions**: validated multiple-choice records produced by an external provider
//! - **Lifelines**: phone-a-friend and ask-the-audience, once per game each
//! - **Game state**: the `Active → Won | Lost` transition machine
//! - **View model**: a pure render of the state for whatever surface displays it

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod audience;
mod game;
mod question;
mod reward;
mod types;
mod view;

pub use action::{AnswerOutcome, GameError, GameEvent, Transition};
pub use audience::{AudiencePoll, BASE_PCT, DECAY_PER_LEVEL, FLOOR_PCT};
pub use game::{GameState, GameStatus, LifelineReveal};
pub use question::{Question, QuestionError};
pub use reward::{MILESTONE_INTERVAL, QUESTION_COUNT, RewardTable};
pub use types::{Lifeline, OptionLabel};
pub use view::{Banner, GameView, LadderRung, LifelineButton, OptionView, QuestionView};
