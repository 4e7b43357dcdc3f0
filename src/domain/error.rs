//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent rule violations on documents and their content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown direction: {0}")]
    UnknownDirection(String),

    #[error("unknown document type: {0}")]
    UnknownDocumentType(String),

    #[error("name must not be empty")]
    EmptyName,

    #[error("table {0} does not exist")]
    TableIndexOutOfRange(usize),

    #[error("row {row} does not exist in table {table}")]
    RowIndexOutOfRange { table: usize, row: usize },

    #[error("column {column} does not exist in table {table}")]
    ColumnIndexOutOfRange { table: usize, column: usize },

    #[error("table {0} must keep at least one row")]
    LastRow(usize),

    #[error("table {0} must keep at least one column")]
    LastColumn(usize),

    #[error("version not found: {0}")]
    VersionNotFound(String),

    #[error("attachment not found: {0}")]
    AttachmentNotFound(String),

    #[error("document cannot be related to itself: {0}")]
    SelfRelation(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
