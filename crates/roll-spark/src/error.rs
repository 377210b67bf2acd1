//! Error types for spark table operations.

use std::path::PathBuf;

/// Result type for spark operations.
pub type SparkResult<T> = Result<T, SparkError>;

/// Errors that can occur while loading, selecting, or rolling spark tables.
#[derive(Debug, thiserror::Error)]
pub enum SparkError {
    /// The spark data file does not exist.
    #[error("spark data file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The spark data file exists but could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The structured (JSON) spark file is malformed.
    #[error("cannot parse {}: {source}", .path.display())]
    Parse {
        /// The file being parsed.
        path: PathBuf,
        /// The underlying decoder error.
        source: serde_json::Error,
    },

    /// No sheet or table name matched the query.
    #[error("no sheet or table matched: '{name}'{}", did_you_mean(.suggestions))]
    NoMatch {
        /// The name as the user typed it.
        name: String,
        /// Close names from the catalog, best first.
        suggestions: Vec<String>,
    },

    /// A sheet matched but holds no tables to pick from.
    #[error("sheet '{0}' has no tables")]
    EmptySheet(String),

    /// The table is too short for a spark roll.
    #[error("spark table requires at least {required} rows, found {found}")]
    TooFewRows {
        /// Rows present in the table.
        found: usize,
        /// Rows a spark roll needs.
        required: usize,
    },
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.join(", "))
    }
}
