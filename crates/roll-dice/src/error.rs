//! Error types for dice expressions.

/// Errors that can occur while parsing or evaluating a dice expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    /// The expression contained no recognizable term at all.
    #[error("invalid expression \"{0}\". Example: 2d6 + d4 + 3")]
    InvalidExpression(String),

    /// A scanned token could not be interpreted as dice or a constant.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// A dice term asked for zero dice or zero-sided dice, or the expression
    /// opened with a negative dice term.
    #[error("dice and quantity must be positive: {0}")]
    NonPositive(String),

    /// A dice term asked for more dice than a single roll allows.
    #[error("too many dice in {token}: at most {max} per term")]
    TooManyDice {
        /// The offending token.
        token: String,
        /// The per-term limit.
        max: u32,
    },
}

/// Convenience result type for dice operations.
pub type DiceResult<T> = Result<T, DiceError>;
