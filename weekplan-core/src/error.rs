//! Error types for weekplan.

use thiserror::Error;

/// Errors that can occur while building a planner.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Year {0} is outside the supported calendar range")]
    InvalidYear(i32),

    #[error("Unknown locale '{0}'")]
    UnknownLocale(String),

    #[error("OUTFILE must have either a .pdf or a .tex extension (got '{0}')")]
    UnsupportedOutput(String),

    #[error("Calendar source error: {0}")]
    Source(String),

    #[error("Credential store error: {0}")]
    Credentials(String),

    #[error("Failed to run compiler '{program}': {source}")]
    CompilerSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Compiler '{program}' exited with {status}")]
    CompilerFailed {
        program: String,
        status: String,
        /// Captured stdout of the compiler run
        output: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for weekplan operations.
pub type PlannerResult<T> = Result<T, PlannerError>;
