//! Links between documents of one direction.

use crate::domain::entities::DocumentContent;
use crate::domain::error::{DomainError, DomainResult};

impl DocumentContent {
    /// Link `other_id`. Returns `false` when the link already exists.
    pub fn add_related(&mut self, own_id: &str, other_id: &str) -> DomainResult<bool> {
        if own_id == other_id {
            return Err(DomainError::SelfRelation(own_id.to_string()));
        }
        if self.related_documents.iter().any(|id| id == other_id) {
            return Ok(false);
        }
        self.related_documents.push(other_id.to_string());
        Ok(true)
    }

    /// Drop the link to `other_id`. Returns `false` when there was none.
    pub fn remove_related(&mut self, other_id: &str) -> bool {
        let before = self.related_documents.len();
        self.related_documents.retain(|id| id != other_id);
        before != self.related_documents.len()
    }

    pub fn is_related(&self, other_id: &str) -> bool {
        self.related_documents.iter().any(|id| id == other_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_existing_link_when_adding_again_then_not_duplicated() {
        let mut content = DocumentContent::default();
        assert_eq!(content.add_related("1-1", "1-2"), Ok(true));
        assert_eq!(content.add_related("1-1", "1-2"), Ok(false));
        assert_eq!(content.related_documents, vec!["1-2".to_string()]);
    }

    #[test]
    fn given_own_id_when_linking_then_rejected() {
        let mut content = DocumentContent::default();
        assert!(content.add_related("1-1", "1-1").is_err());
    }

    #[test]
    fn given_link_when_removed_then_gone() {
        let mut content = DocumentContent::default();
        content.add_related("1-1", "2-1").unwrap();
        assert!(content.remove_related("2-1"));
        assert!(!content.remove_related("2-1"));
        assert!(!content.is_related("2-1"));
    }
}
