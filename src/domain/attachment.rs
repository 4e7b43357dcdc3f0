//! Attachment records built from picked or dropped files.

use chrono::{DateTime, Utc};

use crate::domain::entities::{AttachmentKind, BlobRef, Document, DocumentAttachment};
use crate::domain::error::{DomainError, DomainResult};

/// File handed over by the file picker or a drop target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingFile {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub blob: BlobRef,
}

impl AttachmentKind {
    /// Classify by file extension first, then by MIME type.
    pub fn classify(name: &str, mime_type: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.ends_with(".pdf") {
            AttachmentKind::Pdf
        } else if lower.ends_with(".doc") || lower.ends_with(".docx") {
            AttachmentKind::Word
        } else if lower.ends_with(".xls") || lower.ends_with(".xlsx") {
            AttachmentKind::Excel
        } else if mime_type.starts_with("image/") {
            AttachmentKind::Image
        } else {
            AttachmentKind::Other
        }
    }
}

/// Human readable size: bytes below 1 KiB, one decimal KB below 1 MiB, MB above.
pub fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    if bytes < KIB {
        format!("{bytes} B")
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    }
}

impl DocumentAttachment {
    pub fn from_file(
        id: String,
        file: IncomingFile,
        uploaded_by: &str,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind: AttachmentKind::classify(&file.name, &file.mime_type),
            name: file.name,
            size: file.size,
            blob: file.blob,
            uploaded_at: now,
            uploaded_by: uploaded_by.to_string(),
        }
    }
}

impl Document {
    pub fn add_attachment(&mut self, attachment: DocumentAttachment) {
        self.attachments.push(attachment);
    }

    pub fn remove_attachment(&mut self, attachment_id: &str) -> DomainResult<DocumentAttachment> {
        let pos = self
            .attachments
            .iter()
            .position(|a| a.id == attachment_id)
            .ok_or_else(|| DomainError::AttachmentNotFound(attachment_id.to_string()))?;
        Ok(self.attachments.remove(pos))
    }
}
