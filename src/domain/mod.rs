//! Domain layer: entities and tree algebra
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod attachment;
pub mod entities;
pub mod error;
pub mod history;
pub mod links;
pub mod sample;
pub mod table;
pub mod tree;

pub use attachment::{format_size, IncomingFile};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use sample::{sample_forest, sample_forests};
pub use tree::{
    filter_documents, find_node, flatten_documents, forest_to_tree, insert_child, node_ids,
    parent_of, remove_node, subtree_ids, update_node, DocumentFilter, TreeNodeConvert,
};
