//! Explicit application state
//!
//! Everything the knowledge-base screen tracks between user actions: which
//! direction and section are shown, the search box, expanded folders, the
//! selected document, an in-progress rename and the add-item dialog.

use std::collections::BTreeSet;

use tracing::debug;

use crate::application::services::DocumentTreeStore;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    subtree_ids, Direction, Document, DocumentFilter, DocumentType, NodeId, NodeKind,
};

/// Add-item dialog: target parent, kind of node and the form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddDialog {
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
    pub name: String,
    pub document_type: DocumentType,
}

/// Inline rename in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameState {
    pub id: NodeId,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub direction: Direction,
    /// Restricts the document listing to one document type
    pub section: Option<DocumentType>,
    pub query: String,
    pub expanded: BTreeSet<NodeId>,
    pub selected: Option<NodeId>,
    pub renaming: Option<RenameState>,
    pub dialog: Option<AddDialog>,
    default_document_type: DocumentType,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Direction::SafeCity, DocumentType::Instruction)
    }
}

impl AppState {
    pub fn new(direction: Direction, default_document_type: DocumentType) -> Self {
        Self {
            direction,
            section: None,
            query: String::new(),
            expanded: BTreeSet::new(),
            selected: None,
            renaming: None,
            dialog: None,
            default_document_type,
        }
    }

    /// Switch partitions. Selection and expansion belong to the old forest.
    pub fn select_direction(&mut self, direction: Direction) {
        if self.direction == direction {
            return;
        }
        debug!("switching direction {} -> {}", self.direction, direction);
        self.direction = direction;
        self.selected = None;
        self.expanded.clear();
        self.renaming = None;
        self.dialog = None;
    }

    pub fn select_section(&mut self, section: Option<DocumentType>) {
        self.section = section;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn select(&mut self, id: Option<NodeId>) {
        self.selected = id;
    }

    /// Returns whether the folder is expanded afterwards.
    pub fn toggle_folder(&mut self, id: &str) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.to_string());
            true
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn open_add_dialog(&mut self, parent: Option<&str>, kind: NodeKind) {
        self.dialog = Some(AddDialog {
            parent: parent.map(str::to_string),
            kind,
            name: String::new(),
            document_type: self.default_document_type,
        });
    }

    /// Edit the open dialog's fields; ignored when no dialog is open.
    pub fn fill_add_dialog(&mut self, name: &str, document_type: Option<DocumentType>) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.name = name.to_string();
            if let Some(document_type) = document_type {
                dialog.document_type = document_type;
            }
        }
    }

    pub fn close_add_dialog(&mut self) {
        self.dialog = None;
    }

    /// Create the node described by the dialog. The parent gets expanded so
    /// the new node is visible; the dialog stays open if creation fails.
    pub fn submit_add(&mut self, store: &mut DocumentTreeStore) -> ApplicationResult<NodeId> {
        let dialog = self.dialog.as_ref().ok_or(ApplicationError::NoDialog)?;
        let parent = dialog.parent.as_deref();
        let id = match dialog.kind {
            NodeKind::Folder => store.add_folder(self.direction, parent, &dialog.name)?,
            NodeKind::Document => store.add_document(
                self.direction,
                parent,
                &dialog.name,
                dialog.document_type,
            )?,
        };
        if let Some(parent) = dialog.parent.clone() {
            self.expanded.insert(parent);
        }
        self.dialog = None;
        Ok(id)
    }

    pub fn begin_rename(&mut self, store: &DocumentTreeStore, id: &str) -> ApplicationResult<()> {
        let node = store.get(self.direction, id)?;
        self.renaming = Some(RenameState {
            id: id.to_string(),
            value: node.name().to_string(),
        });
        Ok(())
    }

    pub fn set_rename_value(&mut self, value: &str) -> ApplicationResult<()> {
        let renaming = self.renaming.as_mut().ok_or(ApplicationError::NotRenaming)?;
        renaming.value = value.to_string();
        Ok(())
    }

    pub fn commit_rename(&mut self, store: &mut DocumentTreeStore) -> ApplicationResult<()> {
        let renaming = self.renaming.as_ref().ok_or(ApplicationError::NotRenaming)?;
        store.rename(self.direction, &renaming.id, &renaming.value)?;
        self.renaming = None;
        Ok(())
    }

    pub fn cancel_rename(&mut self) {
        self.renaming = None;
    }

    /// Delete `id` and its subtree, dropping any state that pointed into it.
    pub fn delete(&mut self, store: &mut DocumentTreeStore, id: &str) -> ApplicationResult<()> {
        let removed = subtree_ids(store.forest(self.direction), id);
        store.delete(self.direction, id)?;
        if let Some(selected) = &self.selected {
            if removed.contains(selected) {
                self.selected = None;
            }
        }
        if let Some(renaming) = &self.renaming {
            if removed.contains(&renaming.id) {
                self.renaming = None;
            }
        }
        if let Some(AddDialog {
            parent: Some(parent),
            ..
        }) = &self.dialog
        {
            if removed.contains(parent) {
                self.dialog = None;
            }
        }
        for gone in &removed {
            self.expanded.remove(gone);
        }
        Ok(())
    }

    /// Documents of the current direction matching section and query.
    pub fn visible_documents<'s>(&self, store: &'s DocumentTreeStore) -> Vec<&'s Document> {
        let mut filter = DocumentFilter::new(&self.query);
        if let Some(section) = self.section {
            filter = filter.in_section(section);
        }
        store.search(self.direction, &filter)
    }
}
