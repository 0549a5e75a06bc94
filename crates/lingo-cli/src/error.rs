//! Command line error types using thiserror.

use lingo_common::LingoError;

/// Errors reported by the command line front end.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// Options, catalog or file error.
    #[error(transparent)]
    Lingo(#[from] LingoError),

    /// `--params` is not a JSON object.
    #[error("Invalid --params: {0}")]
    Params(String),

    /// The audit found plural entries with the wrong number of forms.
    #[error("{0} catalog entries have the wrong number of plural forms")]
    FormCountMismatch(usize),
}

/// Result type for the command line front end.
pub type CliResult<T> = Result<T, CliError>;
