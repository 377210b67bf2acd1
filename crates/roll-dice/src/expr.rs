//! Dice expression scanning and term classification.
//!
//! An expression is normalized (whitespace removed, lowercased) and scanned
//! left to right for tokens of the form `[+-]? <digits>? d? <digits>`.
//! Characters that do not start such a token are skipped, so `2d6 plus 3`
//! still yields `2d6` and `3`. An expression with no token at all is rejected
//! outright, as is one that opens with a negative dice term (`-1d6`).

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{DiceError, DiceResult};

/// Upper bound on the number of dice a single term may roll.
pub const MAX_DICE: u32 = 100_000;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[+-]?[0-9]*d?[0-9]+").unwrap());

/// The sign attached to a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sign {
    /// Added to the total.
    #[default]
    Plus,
    /// Subtracted from the total.
    Minus,
}

impl Sign {
    /// Apply this sign to an unsigned magnitude.
    pub fn apply(self, value: u64) -> i64 {
        let value = i64::try_from(value).unwrap_or(i64::MAX);
        match self {
            Self::Plus => value,
            Self::Minus => -value,
        }
    }
}

impl std::fmt::Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
        }
    }
}

/// An unsigned term of a dice expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Term {
    /// A fixed number.
    Constant(u32),
    /// `count` dice with `sides` sides each.
    Dice {
        /// Number of dice (at least 1).
        count: u32,
        /// Sides per die (at least 1).
        sides: u32,
    },
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Constant(n) => write!(f, "{n}"),
            Self::Dice { count, sides } => write!(f, "{count}d{sides}"),
        }
    }
}

/// A term together with its sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTerm {
    /// Whether the term adds to or subtracts from the total.
    pub sign: Sign,
    /// The term itself.
    pub term: Term,
}

impl std::fmt::Display for SignedTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.sign, self.term)
    }
}

/// Parse an expression into its signed terms without rolling anything.
pub fn parse_expression(expr: &str) -> DiceResult<Vec<SignedTerm>> {
    let normalized: String = expr
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    let mut terms = Vec::new();
    for token in TOKEN_RE.find_iter(&normalized).map(|m| m.as_str()) {
        let term = classify(token)?;
        if terms.is_empty()
            && term.sign == Sign::Minus
            && matches!(term.term, Term::Dice { .. })
        {
            // nothing to subtract the first dice from
            return Err(DiceError::NonPositive(token.to_string()));
        }
        terms.push(term);
    }

    if terms.is_empty() {
        return Err(DiceError::InvalidExpression(expr.trim().to_string()));
    }

    tracing::debug!(expr, terms = terms.len(), "parsed dice expression");
    Ok(terms)
}

/// Classify one scanned token into a signed term.
fn classify(token: &str) -> DiceResult<SignedTerm> {
    let (sign, body) = match token.as_bytes().first() {
        Some(b'-') => (Sign::Minus, &token[1..]),
        Some(b'+') => (Sign::Plus, &token[1..]),
        _ => (Sign::Plus, token),
    };

    let term = if let Some((count, sides)) = body.split_once('d') {
        let count = if count.is_empty() {
            1
        } else {
            parse_number(count, token)?
        };
        let sides = parse_number(sides, token)?;
        if count == 0 || sides == 0 {
            return Err(DiceError::NonPositive(token.to_string()));
        }
        if count > MAX_DICE {
            return Err(DiceError::TooManyDice {
                token: token.to_string(),
                max: MAX_DICE,
            });
        }
        Term::Dice { count, sides }
    } else if is_digits(body) {
        Term::Constant(parse_number(body, token)?)
    } else {
        return Err(DiceError::InvalidToken(token.to_string()));
    };

    Ok(SignedTerm { sign, term })
}

fn parse_number(digits: &str, token: &str) -> DiceResult<u32> {
    if !is_digits(digits) {
        return Err(DiceError::InvalidToken(token.to_string()));
    }
    digits
        .parse()
        .map_err(|_| DiceError::InvalidToken(token.to_string()))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
