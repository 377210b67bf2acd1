//! Oracles for the `roll` utility.
//!
//! A yes/no oracle answers a question with a single d100 roll judged against
//! one of nine odds profiles, and flags exceptional answers and random events.
//! Narrative rolls are fixed d6 tables for travel, luck, unresolved situations,
//! and the mood of a settlement.

pub mod error;
pub mod narrative;
pub mod odds;

pub use error::{OracleError, OracleResult};
pub use narrative::{NarrativeRoll, NarrativeTable, roll_narrative};
pub use odds::{Answer, Odds, OracleRoll, consult, is_random_event};
