//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::{Direction, DomainError};

/// Application errors wrap domain errors and add store-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("node not found in {direction}: {id}")]
    NodeNotFound { id: String, direction: Direction },

    #[error("not a folder: {0}")]
    NotAFolder(String),

    #[error("not a document: {0}")]
    NotADocument(String),

    #[error("node id already in use: {0}")]
    DuplicateId(String),

    #[error("document id cannot change: {id} became {changed}")]
    IdChanged { id: String, changed: String },

    #[error("no add dialog is open")]
    NoDialog,

    #[error("no node is being renamed")]
    NotRenaming,

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
