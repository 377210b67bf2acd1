//! Fixed d6 tables for narrative prompts.

use roll_dice::RandomSource;
use serde::{Deserialize, Serialize};

/// One of the fixed narrative tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NarrativeTable {
    /// What the party runs into while crossing a hex.
    Wilderness,
    /// How fortune turns.
    Luck,
    /// How an open situation resolves.
    Unresolved,
    /// The mood of a settlement on arrival.
    LocalMood,
}

impl NarrativeTable {
    /// All tables, in the order the CLI runs them.
    pub fn all() -> &'static [Self] {
        &[Self::Wilderness, Self::Luck, Self::Unresolved, Self::LocalMood]
    }

    /// The outcome text for a d6 roll on this table.
    pub fn outcome(self, roll: u32) -> &'static str {
        match (self, roll) {
            (Self::Wilderness, 0..=1) => "Encounter the next Omen from a random Myth.",
            (Self::Wilderness, 2..=3) => "Encounter the next Omen from the nearest Myth.",
            (Self::Wilderness, _) => "Encounter the Hex's Landmark. Otherwise all clear.",
            (Self::Luck, 0..=1) => "Crisis: Something immediately bad.",
            (Self::Luck, 2..=3) => "Problem: Something potentially bad.",
            (Self::Luck, _) => "Blessing: A welcome result.",
            (Self::Unresolved, 0..=1) => "It goes as bad as it could possibly go.",
            (Self::Unresolved, _) => "It unfolds in an unpredictable way.",
            (Self::LocalMood, 0..=1) => "Occupied by a looming or recent woe.",
            (Self::LocalMood, 2..=3) => "There is a sense of things in decline.",
            (Self::LocalMood, _) => "A fine mood and all seems well enough.",
        }
    }

    /// Icon shown before the table name.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Wilderness => "🌲",
            Self::Luck => "🍀",
            Self::Unresolved => "⚖️ ",
            Self::LocalMood => "🏘️ ",
        }
    }
}

impl std::fmt::Display for NarrativeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wilderness => write!(f, "Wilderness"),
            Self::Luck => write!(f, "Luck"),
            Self::Unresolved => write!(f, "Unresolved"),
            Self::LocalMood => write!(f, "Local Mood"),
        }
    }
}

/// The result of a narrative roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NarrativeRoll {
    /// The table rolled on.
    pub table: NarrativeTable,
    /// The d6 roll (1-6).
    pub roll: u32,
    /// The outcome text.
    pub text: &'static str,
}

impl std::fmt::Display for NarrativeRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} d6 → {}: {}",
            self.table.icon(),
            self.table,
            self.roll,
            self.text
        )
    }
}

/// Roll a d6 on a narrative table.
pub fn roll_narrative(table: NarrativeTable, rng: &mut impl RandomSource) -> NarrativeRoll {
    let roll = rng.die(6);
    NarrativeRoll {
        table,
        roll,
        text: table.outcome(roll),
    }
}
