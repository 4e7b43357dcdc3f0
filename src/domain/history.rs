//! Version history and usage metrics of a [`Document`].

use chrono::{DateTime, Utc};

use crate::domain::entities::{Document, DocumentContent, DocumentMetrics, DocumentVersion};
use crate::domain::error::{DomainError, DomainResult};

impl Document {
    /// Append a snapshot of `content` to the history.
    pub fn push_version(
        &mut self,
        id: String,
        content: DocumentContent,
        author: &str,
        comment: &str,
        now: DateTime<Utc>,
    ) -> &DocumentVersion {
        self.versions.push(DocumentVersion {
            id,
            timestamp: now,
            author: author.to_string(),
            content,
            comment: comment.to_string(),
        });
        &self.versions[self.versions.len() - 1]
    }

    pub fn version(&self, version_id: &str) -> DomainResult<&DocumentVersion> {
        self.versions
            .iter()
            .find(|v| v.id == version_id)
            .ok_or_else(|| DomainError::VersionNotFound(version_id.to_string()))
    }

    /// Overwrite the current content with a stored version. History is kept as is.
    pub fn restore_version(&mut self, version_id: &str) -> DomainResult<()> {
        let content = self.version(version_id)?.content.clone();
        self.content = content;
        Ok(())
    }

    /// History sorted by timestamp, newest first. Stable for equal timestamps.
    pub fn versions_newest_first(&self) -> Vec<&DocumentVersion> {
        let mut sorted: Vec<_> = self.versions.iter().collect();
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        sorted
    }

    pub fn record_view(&mut self, now: DateTime<Utc>) {
        self.metrics_or_init(now).views += 1;
    }

    pub fn record_edit(&mut self, now: DateTime<Utc>) {
        let metrics = self.metrics_or_init(now);
        metrics.edit_count += 1;
        metrics.updated_at = now;
    }

    fn metrics_or_init(&mut self, now: DateTime<Utc>) -> &mut DocumentMetrics {
        self.metrics.get_or_insert_with(|| DocumentMetrics::new(now))
    }
}
