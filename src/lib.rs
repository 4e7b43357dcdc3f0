//! kbase: in-memory knowledge base of folder/document trees, one per direction.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
