//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on the Clock and IdGenerator boundary traits
//! but are themselves concrete structs, not traits.

mod editor;
mod store;

pub use editor::EditorSession;
pub use store::{DocumentTreeStore, StoreDefaults};
