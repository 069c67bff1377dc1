//! State management for components
//!
//! Component state lives in `Signal`s created from the component's
//! `ReactiveScope`. Hosts poll the scope after dispatching an event and
//! re-render when any signal was written.

mod reactive;

pub use reactive::{ReactiveScope, Signal};
