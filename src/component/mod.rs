//! Component model
//!
//! This module contains the types and traits related to the component model,
//! including lifecycle management, reactive state, props, and rendering.

mod error;
mod lifecycle;
mod node;

#[cfg(test)]
mod tests;

pub use error::ComponentError;
pub use lifecycle::LifecycleManager;
pub use node::{Node, SVG_NAMESPACE};

use crate::{
    events::{DomEvent, EventEmitter},
    state::{ReactiveScope, Signal},
};

/// Lifecycle phase of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecyclePhase {
    /// Component is created but not yet mounted
    #[default]
    Created,
    /// Component is being mounted
    Mounting,
    /// Component is fully mounted and operational
    Mounted,
    /// Component is about to be updated
    BeforeUpdate,
    /// Component is updating
    Updating,
    /// Component is about to be unmounted
    BeforeUnmount,
    /// Component is being unmounted
    Unmounting,
    /// Component is unmounted and inactive
    Unmounted,
}

/// Component trait - implemented by all UI components
///
/// Components are single-threaded: every method runs inside a native event
/// callback or a host call on the UI thread.
pub trait Component: 'static {
    /// The props type for this component
    type Props: Clone;

    /// Messages attached to render-tree listeners and routed back by hosts
    type Message: Clone + 'static;

    /// Create a new component instance
    fn create(props: Self::Props, context: Context) -> Self
    where
        Self: Sized;

    /// Initialize the component - called immediately after creation
    fn initialize(&mut self) -> Result<(), ComponentError> {
        Ok(())
    }

    /// Mount component - called once the rendered tree is attached
    fn mount(&mut self) -> Result<(), ComponentError> {
        Ok(())
    }

    /// Called before component updates with new props
    fn before_update(&mut self, _new_props: &Self::Props) -> Result<(), ComponentError> {
        Ok(())
    }

    /// Update component with new props
    fn update(&mut self, props: Self::Props) -> Result<(), ComponentError>;

    /// Called after the component has updated
    fn after_update(&mut self) -> Result<(), ComponentError> {
        Ok(())
    }

    /// Handle a message raised by a listener of the rendered tree
    fn handle(
        &mut self,
        message: Self::Message,
        event: &mut DomEvent,
    ) -> Result<(), ComponentError>;

    /// Called before component is unmounted
    fn before_unmount(&mut self) -> Result<(), ComponentError> {
        Ok(())
    }

    /// Unmount component - called when component is removed from the tree
    fn unmount(&mut self) -> Result<(), ComponentError> {
        Ok(())
    }

    /// Render component - returns the root nodes
    fn render(&self) -> Result<Vec<Node<Self::Message>>, ComponentError>;
}

/// Context passed to components providing access to state and events
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Scope owning the component's signals
    scope: ReactiveScope,

    /// Event emitter for notifying the host
    events: EventEmitter,

    /// Current lifecycle phase
    lifecycle_phase: LifecyclePhase,
}

impl Context {
    /// Create a new context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state with initial value
    pub fn state<T: 'static>(&self, initial: T) -> Signal<T> {
        self.scope.signal(initial)
    }

    /// Get the reactive scope
    pub fn scope(&self) -> &ReactiveScope {
        &self.scope
    }

    /// Get event emitter
    pub fn events(&self) -> &EventEmitter {
        &self.events
    }

    /// Set the current lifecycle phase
    pub fn set_lifecycle_phase(&mut self, phase: LifecyclePhase) {
        self.lifecycle_phase = phase;
    }

    pub fn lifecycle_phase(&self) -> LifecyclePhase {
        self.lifecycle_phase
    }
}
