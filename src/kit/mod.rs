// Kit component library

pub mod components;
pub mod theme;

/// Re-export of common components for convenience
pub mod prelude {
    pub use crate::kit::components::input::{
        FocusChanged, FocusControl, Input, InputMessage, InputProps, InputSize, ValueChanged,
    };
    pub use crate::kit::theme::Theme;
}
