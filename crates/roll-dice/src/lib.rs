//! Dice expression evaluation for the `roll` utility.
//!
//! Parses free-form dice arithmetic such as `2d6 + d4 + 3`, rolls every dice
//! term against an injectable [`RandomSource`], and reports the total along
//! with a per-term breakdown. The random source lives here because every other
//! crate in the workspace draws from it too.

pub mod error;
pub mod expr;
pub mod random;
pub mod roll;

pub use error::{DiceError, DiceResult};
pub use expr::{MAX_DICE, Sign, SignedTerm, Term, parse_expression};
pub use random::{RandomSource, ScriptedRandom, StdRandom};
pub use roll::{RollOutcome, TermResult, evaluate};
