//! Paired d12 rolls on a spark table.

use roll_dice::RandomSource;
use serde::{Deserialize, Serialize};

use crate::catalog::SparkTable;
use crate::error::{SparkError, SparkResult};

/// Sides of each spark die; also the minimum table length.
pub const SPARK_DIE: u32 = 12;

/// One value picked from one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparkPick {
    /// Label of the column the value came from.
    pub column: String,
    /// The d12 roll, which is also the 1-based row index.
    pub index: u32,
    /// The picked value.
    pub value: String,
}

impl std::fmt::Display for SparkPick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: '{}'", self.column, self.value)
    }
}

/// The result of a spark roll: one pick from each column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparkRoll {
    /// Pick from the first column.
    pub first: SparkPick,
    /// Pick from the second column.
    pub second: SparkPick,
}

impl SparkRoll {
    /// Both roll values, first column first.
    pub fn indices(&self) -> [u32; 2] {
        [self.first.index, self.second.index]
    }
}

impl std::fmt::Display for SparkRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} + {}", self.first, self.second)
    }
}

/// Roll 2d12 on a table: the first die picks from column one, the second
/// independently from column two.
pub fn roll_spark(table: &SparkTable, rng: &mut impl RandomSource) -> SparkResult<SparkRoll> {
    let required = SPARK_DIE as usize;
    if table.len() < required {
        return Err(SparkError::TooFewRows {
            found: table.len(),
            required,
        });
    }

    let r1 = rng.die(SPARK_DIE).clamp(1, SPARK_DIE);
    let r2 = rng.die(SPARK_DIE).clamp(1, SPARK_DIE);
    let (col1, col2) = &table.columns;

    Ok(SparkRoll {
        first: SparkPick {
            column: col1.clone(),
            index: r1,
            value: table.rows[r1 as usize - 1].0.clone(),
        },
        second: SparkPick {
            column: col2.clone(),
            index: r2,
            value: table.rows[r2 as usize - 1].1.clone(),
        },
    })
}
