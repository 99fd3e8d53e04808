//! Small domain enums shared across the crate.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// A one-shot helper the player may spend once per game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumIter,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Lifeline {
    /// A friend who always names the correct option.
    PhoneAFriend,
    /// A simulated audience poll biased toward the correct option.
    AskAudience,
}

impl Lifeline {
    /// Returns the button caption shown to the player.
    pub fn label(self) -> &'static str {
        match self {
            Self::PhoneAFriend => "📞 Gọi cho người thân",
            Self::AskAudience => "📊 Ý kiến khán giả",
        }
    }
}

/// Letter label of one of the four answer slots.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, strum::Display,
)]
pub enum OptionLabel {
    /// Slot 0.
    A,
    /// Slot 1.
    B,
    /// Slot 2.
    C,
    /// Slot 3.
    D,
}

impl OptionLabel {
    /// Maps an option index (0-3) to its letter.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    /// Returns the option index (0-3) for this letter.
    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }
}
