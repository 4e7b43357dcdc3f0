//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on the clock and id boundary traits.

pub mod error;
pub mod services;
pub mod state;

pub use error::{ApplicationError, ApplicationResult};
pub use services::{DocumentTreeStore, EditorSession, StoreDefaults};
pub use state::{AddDialog, AppState, RenameState};
