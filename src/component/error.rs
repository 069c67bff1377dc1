//! Error types for component operations

use std::error::Error;
use std::fmt;

use crate::component::LifecyclePhase;

/// Errors that can occur during component operations
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentError {
    /// Invalid lifecycle transition
    InvalidLifecycleTransition(LifecyclePhase, String),

    /// Error rendering component
    RenderError(String),

    /// Error mounting component
    MountError(String),

    /// Error unmounting component
    UnmountError(String),
}

impl fmt::Display for ComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLifecycleTransition(phase, operation) => write!(
                f,
                "Invalid lifecycle transition: cannot {operation} while in {phase:?} phase"
            ),
            Self::RenderError(msg) => write!(f, "Error rendering component: {msg}"),
            Self::MountError(msg) => write!(f, "Error mounting component: {msg}"),
            Self::UnmountError(msg) => write!(f, "Error unmounting component: {msg}"),
        }
    }
}

impl Error for ComponentError {}
