//! Event trait for the events system

use std::any::Any;

/// Generic event trait
pub trait Event: 'static {
    /// Convert to Any for downcasting
    fn as_any(&self) -> &dyn Any;
}

/// Default implementation for types that implement Clone
impl<T: Any + Clone + 'static> Event for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}
