//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.
//! The `*_lines` helpers return plain text so the session command can write
//! them to any sink.

use colored::Colorize;
use itertools::Itertools;

use crate::domain::{format_size, Document, FolderNode, Table};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print completed action (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// One listing line: id, type and name separated by tabs.
pub fn document_line(doc: &Document) -> String {
    format!("{}\t{}\t{}", doc.id, doc.document_type, doc.name)
}

/// Plain description of a folder or document.
pub fn node_lines(node: &FolderNode) -> Vec<String> {
    match node {
        FolderNode::Folder(folder) => {
            let mut lines = vec![format!("folder {} [{}]", folder.name, folder.id)];
            lines.extend(folder.children.iter().map(|child| {
                format!("  {} {} [{}]", child.kind(), child.name(), child.id())
            }));
            lines
        }
        FolderNode::Document(doc) => document_lines(doc),
    }
}

fn document_lines(doc: &Document) -> Vec<String> {
    let mut lines = vec![
        format!("document {} [{}]", doc.name, doc.id),
        format!("type: {}", doc.document_type.section_title()),
    ];
    if let Some(author) = &doc.author {
        lines.push(format!("author: {author}"));
    }
    if !doc.tags.is_empty() {
        lines.push(format!("tags: {}", doc.tags.iter().join(", ")));
    }
    if let Some(metrics) = &doc.metrics {
        lines.push(format!(
            "views: {}, edits: {}, updated: {}",
            metrics.views,
            metrics.edit_count,
            metrics.updated_at.format("%Y-%m-%d %H:%M")
        ));
    }
    if !doc.content.text.is_empty() {
        lines.push(String::new());
        lines.extend(doc.content.text.lines().map(str::to_string));
    }
    for (i, table) in doc.content.tables.iter().enumerate() {
        lines.push(format!("table {}:", i + 1));
        lines.extend(table_lines(table));
    }
    if !doc.content.related_documents.is_empty() {
        lines.push(format!(
            "related: {}",
            doc.content.related_documents.iter().join(", ")
        ));
    }
    for version in doc.versions_newest_first() {
        lines.push(format!(
            "version {} {} {}: {}",
            version.id,
            version.timestamp.format("%Y-%m-%d %H:%M"),
            version.author,
            version.comment
        ));
    }
    for att in &doc.attachments {
        lines.push(format!(
            "attachment {} {} ({}, {})",
            att.id,
            att.name,
            att.kind,
            format_size(att.size)
        ));
    }
    lines
}

fn table_lines(table: &Table) -> Vec<String> {
    table
        .rows
        .iter()
        .map(|row| format!("  | {} |", row.cells.iter().map(|c| &c.content).join(" | ")))
        .collect()
}
