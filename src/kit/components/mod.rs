// Kit component module organization

// Input components
pub mod input;

// Re-export commonly used components
pub use input::{FocusControl, Input, InputProps, InputSize};
