//! Spark tables for the `roll` utility.
//!
//! A spark table is a twelve-row, two-column table: rolling 2d12 picks one
//! value from each column and the pair seeds an idea at the table. Tables are
//! grouped into sheets and loaded either from JSON or from the semicolon
//! delimited text a spreadsheet export produces. Users name a sheet or table
//! loosely; the selector resolves the name case-, space-, and
//! diacritic-insensitively.

pub mod catalog;
pub mod error;
pub mod loader;
pub mod normalize;
pub mod roller;
pub mod selector;

pub use catalog::{NamedTable, Sheet, SparkCatalog, SparkTable};
pub use error::{SparkError, SparkResult};
pub use loader::{DEFAULT_SPARK_FILE, UNKNOWN_SHEET, load_catalog, parse_delimited, parse_structured};
pub use normalize::normalize_name;
pub use roller::{SPARK_DIE, SparkPick, SparkRoll, roll_spark};
pub use selector::{Hit, MatchTier, Selection, find_match, select_table};
