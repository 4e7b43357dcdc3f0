//! Service container for dependency injection
//!
//! Wires settings, clock and id generator into the store and UI state.

use std::sync::Arc;

use crate::application::{AppState, DocumentTreeStore};
use crate::config::Settings;
use crate::infrastructure::traits::{Clock, IdGenerator, SystemClock, UuidIdGenerator};

/// Container holding settings and the boundary implementations services need.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Time source
    pub clock: Arc<dyn Clock>,

    /// Id source for nodes, versions and attachments
    pub ids: Arc<dyn IdGenerator>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(SystemClock), Arc::new(UuidIdGenerator))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            settings: Arc::new(settings),
            clock,
            ids,
        }
    }

    /// Store seeded with the sample knowledge base.
    pub fn store(&self) -> DocumentTreeStore {
        DocumentTreeStore::with_sample_data(
            Arc::clone(&self.clock),
            Arc::clone(&self.ids),
            self.settings.store_defaults(),
        )
    }

    /// Fresh UI state starting at the configured direction.
    pub fn app_state(&self) -> AppState {
        AppState::new(
            self.settings.default_direction,
            self.settings.default_document_type,
        )
    }
}
