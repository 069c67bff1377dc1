// Styled text input component with clear button and affix slots
pub mod component;
pub mod events;
pub mod platform;
pub mod state;

pub mod kit;

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export of common types for convenience
pub mod prelude {
    pub use crate::component::{Component, ComponentError, Context, LifecyclePhase, Node};
    pub use crate::events::{DomEvent, Event, EventEmitter, EventType, PropagationPhase};
    pub use crate::kit::components::input::{
        FocusChanged, FocusControl, Input, InputMessage, InputProps, InputSize, ValueChanged,
    };
    pub use crate::kit::theme::Theme;
    pub use crate::platform::headless::HeadlessHost;
    #[cfg(feature = "web")]
    pub use crate::platform::web::{mount_input, InputElement};
    pub use crate::state::Signal;
}

/// Errors raised while hosting an input
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Attribute error: {0}")]
    Attributes(#[from] serde_json::Error),

    #[error("Component error: {0}")]
    Component(#[from] component::ComponentError),
}
