//! Copy-on-write tree algebra over a [`Forest`].
//!
//! Every rewrite rebuilds only the nodes on the path from the root to the
//! affected node. All other subtrees are carried over as `Arc` clones, so a
//! snapshot taken before the rewrite stays valid and untouched branches remain
//! pointer-equal across revisions.
//!
//! Lookup misses are tolerated: rewriting or inserting under an unknown id
//! returns a forest that shares every node with its input.

use std::sync::Arc;

use termtree::Tree;
use tracing::{instrument, trace};

use crate::domain::entities::{Document, DocumentType, Folder, FolderNode, Forest, NodeRef};

/// Outcome of visiting the target node during a rewrite.
enum Rewrite {
    Keep,
    Replace(FolderNode),
    Remove,
}

/// Depth-first pre-order search, returns the first node with `id`.
pub fn find_node<'a>(forest: &'a [NodeRef], id: &str) -> Option<&'a NodeRef> {
    for node in forest {
        if node.id() == id {
            return Some(node);
        }
        if let FolderNode::Folder(folder) = node.as_ref() {
            if let Some(found) = find_node(&folder.children, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Replace the node with `id` by `updater(node)`; `None` excises the node and its subtree.
///
/// Unknown ids leave the forest unchanged.
#[instrument(level = "trace", skip(forest, updater))]
pub fn update_node<F>(forest: &[NodeRef], id: &str, updater: F) -> Forest
where
    F: FnOnce(&FolderNode) -> Option<FolderNode>,
{
    let mut updater = Some(updater);
    rewrite(forest, id, &mut |node: &FolderNode| match updater.take() {
        Some(f) => match f(node) {
            Some(replacement) => Rewrite::Replace(replacement),
            None => Rewrite::Remove,
        },
        None => Rewrite::Keep,
    })
    .unwrap_or_else(|| forest.to_vec())
}

/// Excise the node with `id` and its subtree.
pub fn remove_node(forest: &[NodeRef], id: &str) -> Forest {
    update_node(forest, id, |_| None)
}

/// Append `new_node` to the children of `parent_id`, or to the root level when `None`.
///
/// A parent that is missing or is a document leaves the forest unchanged.
#[instrument(level = "trace", skip(forest, new_node), fields(new_id = new_node.id()))]
pub fn insert_child(forest: &[NodeRef], parent_id: Option<&str>, new_node: FolderNode) -> Forest {
    let Some(parent_id) = parent_id else {
        let mut roots = forest.to_vec();
        roots.push(Arc::new(new_node));
        return roots;
    };

    let mut pending = Some(new_node);
    rewrite(forest, parent_id, &mut |node: &FolderNode| match node {
        FolderNode::Folder(folder) => match pending.take() {
            Some(child) => {
                let mut folder = folder.clone();
                folder.children.push(Arc::new(child));
                Rewrite::Replace(FolderNode::Folder(folder))
            }
            None => Rewrite::Keep,
        },
        FolderNode::Document(_) => {
            trace!("insert target {} is a document, ignoring", parent_id);
            Rewrite::Keep
        }
    })
    .unwrap_or_else(|| forest.to_vec())
}

/// Rebuild the path to the first node matching `id`.
///
/// Returns `None` when nothing changed, which lets callers keep the original
/// `Arc`s for the whole level.
fn rewrite<V>(nodes: &[NodeRef], id: &str, visit: &mut V) -> Option<Forest>
where
    V: FnMut(&FolderNode) -> Rewrite,
{
    for (i, node) in nodes.iter().enumerate() {
        if node.id() == id {
            return match visit(node.as_ref()) {
                Rewrite::Keep => None,
                Rewrite::Replace(replacement) => {
                    let mut level = nodes.to_vec();
                    level[i] = Arc::new(replacement);
                    Some(level)
                }
                Rewrite::Remove => {
                    let mut level = nodes.to_vec();
                    level.remove(i);
                    Some(level)
                }
            };
        }
        if let FolderNode::Folder(folder) = node.as_ref() {
            if let Some(children) = rewrite(&folder.children, id, visit) {
                let mut level = nodes.to_vec();
                level[i] = Arc::new(FolderNode::Folder(Folder {
                    id: folder.id.clone(),
                    name: folder.name.clone(),
                    children,
                }));
                return Some(level);
            }
        }
    }
    None
}

/// Collect every document in depth-first pre-order. Folders are skipped.
pub fn flatten_documents(forest: &[NodeRef]) -> Vec<&Document> {
    let mut documents = Vec::new();
    collect_documents(forest, &mut documents);
    documents
}

fn collect_documents<'a>(nodes: &'a [NodeRef], out: &mut Vec<&'a Document>) {
    for node in nodes {
        match node.as_ref() {
            FolderNode::Document(doc) => out.push(doc),
            FolderNode::Folder(folder) => collect_documents(&folder.children, out),
        }
    }
}

/// Ids of `node` and every node below it, in pre-order.
pub fn node_ids(node: &FolderNode) -> Vec<String> {
    fn walk(node: &FolderNode, out: &mut Vec<String>) {
        out.push(node.id().to_string());
        if let FolderNode::Folder(folder) = node {
            for child in &folder.children {
                walk(child, out);
            }
        }
    }

    let mut ids = Vec::new();
    walk(node, &mut ids);
    ids
}

/// Ids of `id` and every node below it, in pre-order.
pub fn subtree_ids(forest: &[NodeRef], id: &str) -> Vec<String> {
    find_node(forest, id)
        .map(|node| node_ids(node.as_ref()))
        .unwrap_or_default()
}

/// Id of the folder directly containing `id`, `None` for root-level or unknown nodes.
pub fn parent_of<'a>(forest: &'a [NodeRef], id: &str) -> Option<&'a str> {
    for node in forest {
        if let FolderNode::Folder(folder) = node.as_ref() {
            if folder.children.iter().any(|c| c.id() == id) {
                return Some(&folder.id);
            }
            if let Some(parent) = parent_of(&folder.children, id) {
                return Some(parent);
            }
        }
    }
    None
}

/// Case-insensitive document predicate over name, tags and content text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFilter {
    query: String,
    section: Option<DocumentType>,
}

impl DocumentFilter {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.trim().to_lowercase(),
            section: None,
        }
    }

    /// Restrict matches to one document type.
    pub fn in_section(mut self, section: DocumentType) -> Self {
        self.section = Some(section);
        self
    }

    pub fn matches(&self, document: &Document) -> bool {
        if let Some(section) = self.section {
            if document.document_type != section {
                return false;
            }
        }
        if self.query.is_empty() {
            return true;
        }
        document.name.to_lowercase().contains(&self.query)
            || document
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&self.query))
            || document.content.text.to_lowercase().contains(&self.query)
    }
}

/// Keep the documents accepted by `filter`, preserving order.
pub fn filter_documents<'a, I>(documents: I, filter: &DocumentFilter) -> Vec<&'a Document>
where
    I: IntoIterator<Item = &'a Document>,
{
    documents
        .into_iter()
        .filter(|doc| filter.matches(doc))
        .collect()
}

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for FolderNode {
    fn to_tree_string(&self) -> Tree<String> {
        match self {
            FolderNode::Folder(folder) => {
                let leaves: Vec<_> = folder.children.iter().map(|c| c.to_tree_string()).collect();
                Tree::new(format!("{} [{}]", folder.name, folder.id)).with_leaves(leaves)
            }
            FolderNode::Document(doc) => Tree::new(format!(
                "{} [{}] ({})",
                doc.name, doc.id, doc.document_type
            )),
        }
    }
}

/// Render a whole forest below a synthetic root labelled `title`.
pub fn forest_to_tree(title: &str, forest: &[NodeRef]) -> Tree<String> {
    Tree::new(title.to_string()).with_leaves(forest.iter().map(|n| n.to_tree_string()))
}
