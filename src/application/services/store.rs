//! Document tree store
//!
//! Holds one forest per direction and exposes checked structural operations.
//! The pure tree functions tolerate unknown ids; this service reports them.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    filter_documents, find_node, flatten_documents, insert_child, node_ids, remove_node,
    sample_forests, update_node, Direction, Document, DocumentFilter, DocumentMetrics,
    DocumentType, DomainError, DomainResult, Folder, FolderNode, Forest, NodeId, NodeRef,
};
use crate::infrastructure::traits::{Clock, IdGenerator};

/// Values stamped onto newly created content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreDefaults {
    /// Author recorded on new documents, versions and attachments
    pub author: String,
    /// Column count of a freshly inserted table
    pub table_columns: usize,
}

impl Default for StoreDefaults {
    fn default() -> Self {
        Self {
            author: "Current user".to_string(),
            table_columns: 3,
        }
    }
}

/// In-memory knowledge base partitioned by [`Direction`].
pub struct DocumentTreeStore {
    forests: BTreeMap<Direction, Forest>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    defaults: StoreDefaults,
}

impl DocumentTreeStore {
    pub fn new(
        forests: BTreeMap<Direction, Forest>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        defaults: StoreDefaults,
    ) -> Self {
        Self {
            forests,
            clock,
            ids,
            defaults,
        }
    }

    /// Store seeded with the built-in sample forests.
    pub fn with_sample_data(
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        defaults: StoreDefaults,
    ) -> Self {
        Self::new(sample_forests(), clock, ids, defaults)
    }

    pub fn defaults(&self) -> &StoreDefaults {
        &self.defaults
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn fresh_id(&self, prefix: &str) -> String {
        self.ids.prefixed(prefix)
    }

    /// Current forest of `direction`. Cloning the returned slice's `Arc`s
    /// gives a snapshot that later mutations do not affect.
    pub fn forest(&self, direction: Direction) -> &[NodeRef] {
        self.forests.get(&direction).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn find(&self, direction: Direction, id: &str) -> Option<&NodeRef> {
        find_node(self.forest(direction), id)
    }

    pub fn get(&self, direction: Direction, id: &str) -> ApplicationResult<&NodeRef> {
        self.find(direction, id)
            .ok_or_else(|| ApplicationError::NodeNotFound {
                id: id.to_string(),
                direction,
            })
    }

    pub fn document(&self, direction: Direction, id: &str) -> ApplicationResult<&Document> {
        self.get(direction, id)?
            .as_document()
            .ok_or_else(|| ApplicationError::NotADocument(id.to_string()))
    }

    /// Every document of `direction` in tree order.
    pub fn documents(&self, direction: Direction) -> Vec<&Document> {
        flatten_documents(self.forest(direction))
    }

    pub fn search(&self, direction: Direction, filter: &DocumentFilter) -> Vec<&Document> {
        filter_documents(self.documents(direction), filter)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn rename(&mut self, direction: Direction, id: &str, name: &str) -> ApplicationResult<()> {
        let name = non_empty(name)?;
        self.get(direction, id)?;
        self.rewrite(direction, |forest| {
            update_node(forest, id, |node| Some(node.renamed(name)))
        });
        info!("renamed {} to {:?}", id, name);
        Ok(())
    }

    /// Remove `id` and its subtree, returning the removed node.
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&mut self, direction: Direction, id: &str) -> ApplicationResult<NodeRef> {
        let removed = Arc::clone(self.get(direction, id)?);
        self.rewrite(direction, |forest| remove_node(forest, id));
        info!("deleted {} ({})", id, removed.name());
        Ok(removed)
    }

    /// Append `node` below `parent` (root level when `None`).
    #[instrument(level = "debug", skip(self, node), fields(id = node.id()))]
    pub fn insert(
        &mut self,
        direction: Direction,
        parent: Option<&str>,
        node: FolderNode,
    ) -> ApplicationResult<()> {
        let mut incoming = BTreeSet::new();
        for id in node_ids(&node) {
            if self.find(direction, &id).is_some() || incoming.contains(&id) {
                return Err(ApplicationError::DuplicateId(id));
            }
            incoming.insert(id);
        }
        if let Some(parent_id) = parent {
            if self.get(direction, parent_id)?.as_folder().is_none() {
                return Err(ApplicationError::NotAFolder(parent_id.to_string()));
            }
        }
        self.rewrite(direction, |forest| insert_child(forest, parent, node));
        Ok(())
    }

    pub fn add_folder(
        &mut self,
        direction: Direction,
        parent: Option<&str>,
        name: &str,
    ) -> ApplicationResult<NodeId> {
        let name = non_empty(name)?;
        let id = self.ids.next_id();
        self.insert(direction, parent, Folder::new(id.clone(), name).into())?;
        debug!("added folder {} under {:?}", id, parent);
        Ok(id)
    }

    pub fn add_document(
        &mut self,
        direction: Direction,
        parent: Option<&str>,
        name: &str,
        document_type: DocumentType,
    ) -> ApplicationResult<NodeId> {
        let name = non_empty(name)?;
        let id = self.ids.next_id();
        let mut document =
            Document::new(id.clone(), name, document_type).with_author(&self.defaults.author);
        document.metrics = Some(DocumentMetrics::new(self.clock.now()));
        self.insert(direction, parent, document.into())?;
        debug!("added {} document {} under {:?}", document_type, id, parent);
        Ok(id)
    }

    /// Apply `edit` to a copy of document `id` and swap the copy into the tree.
    ///
    /// Nothing is written when `edit` fails or changes the document id.
    pub fn update_document<F>(
        &mut self,
        direction: Direction,
        id: &str,
        edit: F,
    ) -> ApplicationResult<&Document>
    where
        F: FnOnce(&mut Document) -> DomainResult<()>,
    {
        let mut document = self.document(direction, id)?.clone();
        edit(&mut document)?;
        if document.id != id {
            return Err(ApplicationError::IdChanged {
                id: id.to_string(),
                changed: document.id,
            });
        }
        let replacement = FolderNode::Document(document);
        self.rewrite(direction, |forest| {
            update_node(forest, id, move |_| Some(replacement))
        });
        self.document(direction, id)
    }

    fn rewrite<F>(&mut self, direction: Direction, f: F)
    where
        F: FnOnce(&[NodeRef]) -> Forest,
    {
        let next = f(self.forest(direction));
        self.forests.insert(direction, next);
    }
}

fn non_empty(name: &str) -> Result<&str, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(DomainError::EmptyName)
    } else {
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::traits::{FixedClock, SequentialIds};
    use chrono::TimeZone;

    fn store() -> DocumentTreeStore {
        let start = Utc.with_ymd_and_hms(2026, 2, 10, 9, 0, 0).unwrap();
        DocumentTreeStore::with_sample_data(
            Arc::new(FixedClock::new(start)),
            Arc::new(SequentialIds::new()),
            StoreDefaults::default(),
        )
    }

    #[test]
    fn given_blank_name_when_renaming_then_rejected() {
        let mut store = store();
        let err = store.rename(Direction::SafeCity, "1", "   ").unwrap_err();
        assert!(matches!(err, ApplicationError::Domain(DomainError::EmptyName)));
    }

    #[test]
    fn given_failing_edit_when_updating_document_then_tree_unchanged() {
        let mut store = store();
        let before = store.forest(Direction::SafeCity).to_vec();

        let result = store.update_document(Direction::SafeCity, "1-1", |doc| {
            doc.content.text = "changed".into();
            Err(DomainError::TableIndexOutOfRange(0))
        });

        assert!(result.is_err());
        assert_eq!(store.forest(Direction::SafeCity), before.as_slice());
    }
}
