//! Document editor session
//!
//! An open document is a snapshot taken from the store plus a working copy of
//! its content. Edits touch only the working copy until `save`; version,
//! attachment and restore operations are written through immediately.

use tracing::{debug, info, instrument};

use crate::application::services::DocumentTreeStore;
use crate::application::ApplicationResult;
use crate::domain::{
    Direction, Document, DocumentAttachment, DocumentContent, DomainResult, IncomingFile,
};

pub struct EditorSession {
    direction: Direction,
    /// Document as it was when opened or last written through
    snapshot: Document,
    draft: DocumentContent,
    editing: bool,
}

impl EditorSession {
    /// Open document `id`, counting a view.
    #[instrument(level = "debug", skip(store))]
    pub fn open(
        store: &mut DocumentTreeStore,
        direction: Direction,
        id: &str,
    ) -> ApplicationResult<Self> {
        let now = store.now();
        store.update_document(direction, id, |doc| {
            doc.record_view(now);
            Ok(())
        })?;
        let snapshot = store.document(direction, id)?.clone();
        let draft = snapshot.content.clone();
        Ok(Self {
            direction,
            snapshot,
            draft,
            editing: false,
        })
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Document as of the last open, save or write-through.
    pub fn document(&self) -> &Document {
        &self.snapshot
    }

    pub fn id(&self) -> &str {
        &self.document().id
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn draft(&self) -> &DocumentContent {
        &self.draft
    }

    pub fn begin_edit(&mut self) {
        self.editing = true;
    }

    /// Discard the working copy.
    pub fn cancel_edit(&mut self) {
        self.draft = self.document().content.clone();
        self.editing = false;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.draft.text = text.into();
    }

    /// Run a table or link edit against the working copy.
    pub fn edit<F, T>(&mut self, f: F) -> DomainResult<T>
    where
        F: FnOnce(&mut DocumentContent) -> DomainResult<T>,
    {
        f(&mut self.draft)
    }

    /// Append a table with the store's default column count.
    pub fn add_table(&mut self, store: &DocumentTreeStore) -> usize {
        self.draft.add_table(store.defaults().table_columns)
    }

    /// Link `other_id`, which must be a document of the same direction.
    /// Returns `false` when the link already exists.
    pub fn add_related(
        &mut self,
        store: &DocumentTreeStore,
        other_id: &str,
    ) -> ApplicationResult<bool> {
        store.document(self.direction, other_id)?;
        let own = self.id().to_string();
        Ok(self.draft.add_related(&own, other_id)?)
    }

    pub fn remove_related(&mut self, other_id: &str) -> bool {
        self.draft.remove_related(other_id)
    }

    /// Documents already linked from the working copy, in tree order.
    pub fn related_documents<'s>(&self, store: &'s DocumentTreeStore) -> Vec<&'s Document> {
        store
            .documents(self.direction)
            .into_iter()
            .filter(|doc| self.draft.is_related(&doc.id))
            .collect()
    }

    /// Documents that could be linked: same direction, not this one, not yet
    /// linked, name containing `query` (case-insensitive).
    pub fn related_candidates<'s>(
        &self,
        store: &'s DocumentTreeStore,
        query: &str,
    ) -> Vec<&'s Document> {
        let query = query.trim().to_lowercase();
        store
            .documents(self.direction)
            .into_iter()
            .filter(|doc| doc.id != self.id() && !self.draft.is_related(&doc.id))
            .filter(|doc| doc.name.to_lowercase().contains(&query))
            .collect()
    }

    /// Write the working copy to the store and count an edit.
    #[instrument(level = "debug", skip(self, store), fields(id = self.id()))]
    pub fn save(&mut self, store: &mut DocumentTreeStore) -> ApplicationResult<()> {
        let now = store.now();
        let content = self.draft.clone();
        store.update_document(self.direction, self.id(), |doc| {
            doc.content = content;
            doc.record_edit(now);
            Ok(())
        })?;
        self.refresh(store)?;
        self.editing = false;
        info!("saved document {}", self.id());
        Ok(())
    }

    /// Store the working copy as a new version. Returns the version id.
    #[instrument(level = "debug", skip(self, store), fields(id = self.id()))]
    pub fn save_version(
        &mut self,
        store: &mut DocumentTreeStore,
        comment: &str,
    ) -> ApplicationResult<String> {
        let version_id = store.fresh_id("v");
        let now = store.now();
        let author = store.defaults().author.clone();
        let content = self.draft.clone();
        let vid = version_id.clone();
        store.update_document(self.direction, self.id(), |doc| {
            doc.push_version(vid, content, &author, comment, now);
            Ok(())
        })?;
        self.refresh(store)?;
        debug!("stored version {}", version_id);
        Ok(version_id)
    }

    /// Replace current content with a stored version, keeping the history.
    #[instrument(level = "debug", skip(self, store), fields(id = self.id()))]
    pub fn restore_version(
        &mut self,
        store: &mut DocumentTreeStore,
        version_id: &str,
    ) -> ApplicationResult<()> {
        store.update_document(self.direction, self.id(), |doc| doc.restore_version(version_id))?;
        self.refresh(store)?;
        self.draft = self.document().content.clone();
        info!("restored version {}", version_id);
        Ok(())
    }

    /// Attach a picked or dropped file. Returns the attachment id.
    pub fn add_attachment(
        &mut self,
        store: &mut DocumentTreeStore,
        file: IncomingFile,
    ) -> ApplicationResult<String> {
        let attachment = DocumentAttachment::from_file(
            store.fresh_id("att"),
            file,
            &store.defaults().author,
            store.now(),
        );
        let attachment_id = attachment.id.clone();
        store.update_document(self.direction, self.id(), |doc| {
            doc.add_attachment(attachment);
            Ok(())
        })?;
        self.refresh(store)?;
        Ok(attachment_id)
    }

    pub fn remove_attachment(
        &mut self,
        store: &mut DocumentTreeStore,
        attachment_id: &str,
    ) -> ApplicationResult<()> {
        store.update_document(self.direction, self.id(), |doc| {
            doc.remove_attachment(attachment_id).map(|_| ())
        })?;
        self.refresh(store)
    }

    /// Re-read the snapshot from the store. The working copy is left alone.
    pub fn refresh(&mut self, store: &DocumentTreeStore) -> ApplicationResult<()> {
        self.snapshot = store.document(self.direction, self.id())?.clone();
        Ok(())
    }
}
