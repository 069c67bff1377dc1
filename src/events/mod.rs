//! Event system for the input component
//!
//! The event system provides:
//! - Generic event trait with downcasting support
//! - Event emitter for component-to-host notifications with type erasure
//! - DOM event vocabulary shared by the render tree and platform hosts

pub mod dom;
pub mod emitter;
pub mod event;

pub use dom::{DomEvent, EventType, PropagationPhase};
pub use emitter::EventEmitter;
pub use event::Event;
