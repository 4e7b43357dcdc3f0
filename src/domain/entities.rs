//! Domain entities: core data structures

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Node identifier, unique within one direction.
pub type NodeId = String;

/// Shared handle to a node. Unchanged subtrees are shared between forest revisions.
pub type NodeRef = Arc<FolderNode>;

/// Ordered root-level nodes of one direction.
pub type Forest = Vec<NodeRef>;

/// Organizational partition of the knowledge base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    SafeCity,
    Transport,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::SafeCity, Direction::Transport];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::SafeCity => "safe-city",
            Direction::Transport => "transport",
        }
    }

    /// Human readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Direction::SafeCity => "Safe City",
            Direction::Transport => "Intelligent Transport Systems",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownDirection(s.to_string()))
    }
}

/// Kind of a document; also the "section" a reader browses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Instruction,
    Process,
    Document,
    Reference,
}

impl DocumentType {
    pub const ALL: [DocumentType; 4] = [
        DocumentType::Instruction,
        DocumentType::Process,
        DocumentType::Document,
        DocumentType::Reference,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Instruction => "instruction",
            DocumentType::Process => "process",
            DocumentType::Document => "document",
            DocumentType::Reference => "reference",
        }
    }

    /// Section heading used when listing documents of this type.
    pub fn section_title(&self) -> &'static str {
        match self {
            DocumentType::Instruction => "Instructions",
            DocumentType::Process => "Business processes",
            DocumentType::Document => "Documents",
            DocumentType::Reference => "Reference",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownDocumentType(s.to_string()))
    }
}

/// Discriminant of [`FolderNode`], used where a node is described before it exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Folder,
    Document,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Folder => f.write_str("folder"),
            NodeKind::Document => f.write_str("document"),
        }
    }
}

/// A node of the knowledge base tree: either a container or a leaf with content.
#[derive(Debug, Clone, PartialEq)]
pub enum FolderNode {
    Folder(Folder),
    Document(Document),
}

impl FolderNode {
    pub fn id(&self) -> &str {
        match self {
            FolderNode::Folder(f) => &f.id,
            FolderNode::Document(d) => &d.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FolderNode::Folder(f) => &f.name,
            FolderNode::Document(d) => &d.name,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            FolderNode::Folder(_) => NodeKind::Folder,
            FolderNode::Document(_) => NodeKind::Document,
        }
    }

    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            FolderNode::Folder(f) => Some(f),
            FolderNode::Document(_) => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            FolderNode::Document(d) => Some(d),
            FolderNode::Folder(_) => None,
        }
    }

    /// Copy of this node carrying a new name. Children stay shared.
    pub fn renamed(&self, name: &str) -> FolderNode {
        let mut node = self.clone();
        match &mut node {
            FolderNode::Folder(f) => f.name = name.to_string(),
            FolderNode::Document(d) => d.name = name.to_string(),
        }
        node
    }
}

impl From<Folder> for FolderNode {
    fn from(folder: Folder) -> Self {
        FolderNode::Folder(folder)
    }
}

impl From<Document> for FolderNode {
    fn from(document: Document) -> Self {
        FolderNode::Document(document)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Folder {
    pub id: NodeId,
    pub name: String,
    pub children: Forest,
}

impl Folder {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = FolderNode>) -> Self {
        self.children = children.into_iter().map(Arc::new).collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: NodeId,
    pub name: String,
    pub document_type: DocumentType,
    pub content: DocumentContent,
    /// Append-only history, oldest first.
    pub versions: Vec<DocumentVersion>,
    pub metrics: Option<DocumentMetrics>,
    pub attachments: Vec<DocumentAttachment>,
    pub tags: Vec<String>,
    pub author: Option<String>,
}

impl Document {
    pub fn new(
        id: impl Into<NodeId>,
        name: impl Into<String>,
        document_type: DocumentType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            document_type,
            content: DocumentContent::default(),
            versions: Vec::new(),
            metrics: None,
            attachments: Vec::new(),
            tags: Vec::new(),
            author: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content.text = text.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

/// Text body plus tables and links to related documents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentContent {
    pub text: String,
    pub tables: Vec<Table>,
    pub related_documents: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableCell {
    pub content: String,
}

impl TableCell {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Immutable snapshot of a document's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentVersion {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub author: String,
    pub content: DocumentContent,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMetrics {
    pub views: u64,
    pub edit_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DocumentMetrics {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            views: 0,
            edit_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// File category derived from name and MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Pdf,
    Word,
    Excel,
    Image,
    Other,
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttachmentKind::Pdf => "PDF",
            AttachmentKind::Word => "Word",
            AttachmentKind::Excel => "Excel",
            AttachmentKind::Image => "Image",
            AttachmentKind::Other => "File",
        };
        f.write_str(name)
    }
}

/// Opaque reference to attachment bytes held outside the tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobRef(pub String);

impl fmt::Display for BlobRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentAttachment {
    pub id: String,
    pub name: String,
    pub kind: AttachmentKind,
    /// Size in bytes
    pub size: u64,
    pub blob: BlobRef,
    pub uploaded_at: DateTime<Utc>,
    pub uploaded_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_kebab_case_when_parsing_direction_then_matches() {
        assert_eq!("safe-city".parse::<Direction>().unwrap(), Direction::SafeCity);
        assert_eq!("Transport".parse::<Direction>().unwrap(), Direction::Transport);
        assert!("metro".parse::<Direction>().is_err());
    }

    #[test]
    fn given_document_type_when_round_tripping_display_then_parses_back() {
        for t in DocumentType::ALL {
            assert_eq!(t.to_string().parse::<DocumentType>().unwrap(), t);
        }
    }

    #[test]
    fn given_folder_when_renamed_then_children_are_shared() {
        let folder: FolderNode = Folder::new("1", "old")
            .with_children([FolderNode::from(Document::new(
                "1-1",
                "doc",
                DocumentType::Process,
            ))])
            .into();

        let renamed = folder.renamed("new");

        assert_eq!(renamed.name(), "new");
        let before = &folder.as_folder().unwrap().children[0];
        let after = &renamed.as_folder().unwrap().children[0];
        assert!(Arc::ptr_eq(before, after));
    }
}
