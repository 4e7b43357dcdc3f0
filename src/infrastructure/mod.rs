//! Infrastructure layer: clock/id implementations and DI container
//!
//! This layer implements the boundary traits and wires up services.

pub mod di;
pub mod traits;

pub use di::ServiceContainer;
pub use traits::{Clock, FixedClock, IdGenerator, SequentialIds, SystemClock, UuidIdGenerator};
