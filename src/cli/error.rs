//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::exitcode;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => exitcode::USAGE,
            CliError::Io(_) => exitcode::IOERR,
            CliError::Application(e) => match e {
                ApplicationError::Config { .. } => exitcode::CONFIG,
                ApplicationError::NodeNotFound { .. } => exitcode::NOINPUT,
                ApplicationError::Domain(_)
                | ApplicationError::NotAFolder(_)
                | ApplicationError::NotADocument(_)
                | ApplicationError::DuplicateId(_)
                | ApplicationError::IdChanged { .. } => exitcode::DATAERR,
                ApplicationError::NoDialog | ApplicationError::NotRenaming => exitcode::SOFTWARE,
            },
        }
    }
}
