use std::path::PathBuf;
use thiserror::Error;

/// Failures the report run can name. Degenerate data (an empty category, an
/// average with nothing left to average) is not an error and never lands here.
#[derive(Error, Debug)]
pub enum OverviewError {
    #[error("statement folder not found: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("could not access {} to write the report, please verify the path", .0.display())]
    UnwritableOutput(PathBuf),

    #[error("unsupported statement file (expected a scotiabank or bmo export): {}", .0.display())]
    UnsupportedStatement(PathBuf),

    #[error("no spending found in {} once income rows were removed", .0.display())]
    NoSpending(PathBuf),

    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    #[error("invalid pattern '{pattern}' for {category}: {reason}")]
    InvalidPattern {
        category: String,
        pattern: String,
        reason: String,
    },

    #[error("invalid month '{0}' (expected YYYY-MM)")]
    InvalidMonth(String),
}
