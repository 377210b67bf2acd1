//! Yes/no oracle driven by a d100 and an odds profile.
//!
//! Each profile is a threshold triple `(left, center, right)`. A roll below
//! `center` answers yes, anything else no. Rolls at or below `left` make the
//! yes exceptional, rolls at or above `right` make the no exceptional. Any
//! two-digit double (11, 22, ..., 99) also raises a random event, whatever the
//! answer.

use roll_dice::RandomSource;
use serde::{Deserialize, Serialize};

use crate::error::{OracleError, OracleResult};

/// How likely the asker thinks a "yes" is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Odds {
    /// Practically never.
    Impossible,
    /// Very rarely.
    NearlyImpossible,
    /// Seldom.
    VeryUnlikely,
    /// Less often than not.
    Unlikely,
    /// Even odds.
    #[default]
    FiftyFifty,
    /// More often than not.
    Likely,
    /// Usually.
    VeryLikely,
    /// Almost always.
    NearlyCertain,
    /// Practically always.
    Certain,
}

impl Odds {
    /// Parse odds from a user-supplied string.
    pub fn parse(s: &str) -> OracleResult<Self> {
        let key = s.to_lowercase().replace(['-', '_'], " ");
        match key.split_whitespace().collect::<Vec<_>>().join(" ").as_str() {
            "impossible" => Ok(Self::Impossible),
            "nearly impossible" | "near impossible" | "no way" => Ok(Self::NearlyImpossible),
            "very unlikely" => Ok(Self::VeryUnlikely),
            "unlikely" => Ok(Self::Unlikely),
            "50/50" | "5050" | "fifty fifty" | "even" => Ok(Self::FiftyFifty),
            "likely" => Ok(Self::Likely),
            "very likely" => Ok(Self::VeryLikely),
            "nearly certain" | "near certain" | "near sure thing" => Ok(Self::NearlyCertain),
            "certain" | "sure thing" | "has to be" => Ok(Self::Certain),
            _ => Err(OracleError::UnknownOdds(s.trim().to_string())),
        }
    }

    /// All profiles from least to most likely.
    pub fn all() -> &'static [Self] {
        &[
            Self::Impossible,
            Self::NearlyImpossible,
            Self::VeryUnlikely,
            Self::Unlikely,
            Self::FiftyFifty,
            Self::Likely,
            Self::VeryLikely,
            Self::NearlyCertain,
            Self::Certain,
        ]
    }

    /// The `(left, center, right)` thresholds of this profile.
    pub fn thresholds(self) -> (u32, u32, u32) {
        match self {
            Self::Impossible => (2, 10, 83),
            Self::NearlyImpossible => (3, 15, 84),
            Self::VeryUnlikely => (5, 25, 86),
            Self::Unlikely => (7, 35, 88),
            Self::FiftyFifty => (10, 50, 91),
            Self::Likely => (13, 65, 94),
            Self::VeryLikely => (15, 75, 96),
            Self::NearlyCertain => (17, 85, 98),
            Self::Certain => (18, 90, 99),
        }
    }

    /// Judge a d100 roll against this profile.
    pub fn judge(self, roll: u32) -> OracleRoll {
        let (left, center, right) = self.thresholds();
        let answer = if roll < center {
            if roll <= left {
                Answer::ExceptionalYes
            } else {
                Answer::Yes
            }
        } else if roll >= right {
            Answer::ExceptionalNo
        } else {
            Answer::No
        };
        OracleRoll {
            odds: self,
            roll,
            answer,
            random_event: is_random_event(roll),
        }
    }
}

impl std::str::FromStr for Odds {
    type Err = OracleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Odds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Impossible => write!(f, "Impossible"),
            Self::NearlyImpossible => write!(f, "Nearly Impossible"),
            Self::VeryUnlikely => write!(f, "Very Unlikely"),
            Self::Unlikely => write!(f, "Unlikely"),
            Self::FiftyFifty => write!(f, "50/50"),
            Self::Likely => write!(f, "Likely"),
            Self::VeryLikely => write!(f, "Very Likely"),
            Self::NearlyCertain => write!(f, "Nearly Certain"),
            Self::Certain => write!(f, "Certain"),
        }
    }
}

/// The oracle's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    /// Yes, and more than hoped.
    ExceptionalYes,
    /// Yes.
    Yes,
    /// No.
    No,
    /// No, and worse than feared.
    ExceptionalNo,
}

impl Answer {
    /// Whether this is one of the yes answers.
    pub fn is_yes(self) -> bool {
        matches!(self, Self::Yes | Self::ExceptionalYes)
    }

    /// Whether this answer is exceptional.
    pub fn is_exceptional(self) -> bool {
        matches!(self, Self::ExceptionalYes | Self::ExceptionalNo)
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExceptionalYes => write!(f, "EXCEPTIONAL YES"),
            Self::Yes => write!(f, "YES"),
            Self::No => write!(f, "NO"),
            Self::ExceptionalNo => write!(f, "EXCEPTIONAL NO"),
        }
    }
}

/// A judged oracle roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleRoll {
    /// The odds the question was asked with.
    pub odds: Odds,
    /// The d100 roll (1-100).
    pub roll: u32,
    /// The answer.
    pub answer: Answer,
    /// Whether the roll also raised a random event.
    pub random_event: bool,
}

/// A two-digit double (11, 22, ..., 99) raises a random event.
pub fn is_random_event(roll: u32) -> bool {
    (10..=99).contains(&roll) && roll % 11 == 0
}

/// Roll a d100 and judge it against `odds`.
pub fn consult(odds: Odds, rng: &mut impl RandomSource) -> OracleRoll {
    odds.judge(rng.die(100))
}
