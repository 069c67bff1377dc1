//! Platform hosts for the input component
//!
//! A host turns the rendered `Node` tree into native elements, binds the
//! native control to the component, and feeds native events back as
//! messages. The headless host simulates a browser for tests and
//! non-browser embeddings; the web host drives a real DOM.

use crate::component::{ComponentError, LifecycleManager, Node};
use crate::kit::components::input::{Input, InputMessage};

pub mod headless;

#[cfg(feature = "web")]
pub mod web;

/// Handle to the live native input element
///
/// Focus requests are fire-and-forget: the resulting focus or blur event
/// reaches the component through the host's normal event dispatch.
pub trait NativeInput {
    /// Request focus on the element
    fn focus(&self);

    /// Request the element to give up focus
    fn blur(&self);

    /// The element's live value
    fn value(&self) -> String;
}

/// Render the input and take its single root node
pub(crate) fn render_root(
    manager: &LifecycleManager<Input>,
) -> Result<Node<InputMessage>, ComponentError> {
    manager
        .render()?
        .into_iter()
        .next()
        .ok_or_else(|| ComponentError::RenderError("input rendered no root".to_string()))
}
