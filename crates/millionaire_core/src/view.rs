//! Pure render of a [`GameState`] for the display surface.
//!
//! The view never carries the correct answer index; it only surfaces what
//! the player is entitled to see, including lifeline reveals.

use crate::game::{GameState, GameStatus, LifelineReveal};
use crate::reward::{QUESTION_COUNT, RewardTable};
use crate::types::{Lifeline, OptionLabel};
use derive_new::new;
use serde::Serialize;
use strum::IntoEnumIterator;
use tracing::instrument;

/// One row of the prize ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, new)]
pub struct LadderRung {
    /// Question number.
    pub level: u8,
    /// Prize label for answering it.
    pub prize: &'static str,
    /// Banks a guaranteed prize.
    pub milestone: bool,
    /// The question being played, or the one the game was lost on.
    pub current: bool,
}

/// End-of-game banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Banner {
    /// The ladder was completed.
    Won {
        /// Prize won.
        reward: &'static str,
        /// Text to show.
        message: String,
    },
    /// A wrong answer ended the game.
    Lost {
        /// Level that was failed.
        level: u8,
        /// Prize kept.
        reward: &'static str,
        /// Text to show.
        message: String,
    },
}

/// A labelled answer option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, new)]
pub struct OptionView {
    /// Letter label.
    pub label: OptionLabel,
    /// Index to send back when picked.
    pub index: usize,
    /// Option text.
    pub text: String,
}

/// The question as the player sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    /// Question number.
    pub level: u8,
    /// Heading shown above the prompt.
    pub heading: String,
    /// Question text.
    pub prompt: String,
    /// Options A through D.
    pub options: Vec<OptionView>,
}

/// A lifeline button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, new)]
pub struct LifelineButton {
    /// Which lifeline.
    pub kind: Lifeline,
    /// Caption.
    pub label: &'static str,
    /// Clickable: unused and the game is active.
    pub enabled: bool,
}

/// Everything the surface needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameView {
    /// Level being played.
    pub level: u8,
    /// Status of the game.
    pub status: GameStatus,
    /// Ladder rows, top prize first.
    pub ladder: Vec<LadderRung>,
    /// Shown once the game is over.
    pub banner: Option<Banner>,
    /// Shown while a question is loaded.
    pub question: Option<QuestionView>,
    /// True when the game is active but no question has arrived yet.
    pub awaiting_question: bool,
    /// Lifeline buttons.
    pub lifelines: Vec<LifelineButton>,
    /// Lifeline payloads for the current question.
    pub reveals: Vec<LifelineReveal>,
}

impl GameView {
    /// Renders the state.
    #[instrument(skip(game), fields(level = game.current_level()))]
    pub fn render(game: &GameState) -> Self {
        let level = game.current_level();
        let rewards = game.rewards();
        let marked = (!game.is_won()).then_some(level);

        let ladder = (1..=QUESTION_COUNT)
            .rev()
            .map(|rung| {
                LadderRung::new(
                    rung,
                    rewards.prize(rung),
                    RewardTable::is_milestone(rung),
                    Some(rung) == marked,
                )
            })
            .collect();

        let banner = match (game.status(), game.compute_reward()) {
            (GameStatus::Won, Some(reward)) => Some(Banner::Won {
                reward,
                message: format!(
                    "CHÚC MỪNG! Bạn đã vượt qua câu {} và nhận {} VNĐ!",
                    QUESTION_COUNT, reward
                ),
            }),
            (GameStatus::Lost { level }, Some(reward)) => Some(Banner::Lost {
                level,
                reward,
                message: format!(
                    "Rất tiếc! Bạn đã dừng bước ở câu {}. Tiền thưởng nhận được: {} VNĐ",
                    level, reward
                ),
            }),
            _ => None,
        };

        let question = game.question().map(|q| QuestionView {
            level: *q.level(),
            heading: format!("Câu hỏi {}:", q.level()),
            prompt: q.prompt().clone(),
            options: OptionLabel::iter()
                .zip(q.options().iter())
                .map(|(label, text)| OptionView::new(label, label.index(), text.clone()))
                .collect(),
        });

        let lifelines = Lifeline::iter()
            .map(|kind| {
                LifelineButton::new(kind, kind.label(), game.is_lifeline_available(kind))
            })
            .collect();

        Self {
            level,
            status: game.status(),
            ladder,
            banner,
            question,
            awaiting_question: game.needs_question(),
            lifelines,
            reveals: game.reveals().to_vec(),
        }
    }
}
