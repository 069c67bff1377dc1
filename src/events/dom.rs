//! DOM event vocabulary
//!
//! Nodes register listeners by `EventType`; hosts wrap each native event in
//! a `DomEvent` so handlers can prevent the default action or stop
//! bubbling without touching platform types.

use std::fmt;

/// Native events the render tree can listen to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Element gained focus
    Focus,
    /// Element lost focus
    Blur,
    /// Editable content changed through user input
    Input,
    /// Mouse button pressed and released on the element
    Click,
    /// Mouse button pressed on the element
    MouseDown,
}

impl EventType {
    /// The DOM event name
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Focus => "focus",
            EventType::Blur => "blur",
            EventType::Input => "input",
            EventType::Click => "click",
            EventType::MouseDown => "mousedown",
        }
    }

    /// Whether the event travels up to ancestors after the target
    ///
    /// `focus` and `blur` do not bubble in the DOM.
    pub fn bubbles(&self) -> bool {
        !matches!(self, EventType::Focus | EventType::Blur)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Specifies the event propagation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationPhase {
    /// Event is at the node it was fired on
    Target,

    /// Event is traveling up from the target to its ancestors
    Bubbling,
}

/// A native event as seen by a component handler
#[derive(Debug, Clone)]
pub struct DomEvent {
    event_type: EventType,
    phase: PropagationPhase,
    default_prevented: bool,
    stopped: bool,
}

impl DomEvent {
    /// Create an event at its target
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            phase: PropagationPhase::Target,
            default_prevented: false,
            stopped: false,
        }
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn phase(&self) -> PropagationPhase {
        self.phase
    }

    pub(crate) fn set_phase(&mut self, phase: PropagationPhase) {
        self.phase = phase;
    }

    /// Prevent the default action
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Stop event propagation
    pub fn stop_propagation(&mut self) {
        self.stopped = true;
    }

    /// Check if propagation is stopped
    pub fn is_propagation_stopped(&self) -> bool {
        self.stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_events_do_not_bubble() {
        assert!(!EventType::Focus.bubbles());
        assert!(!EventType::Blur.bubbles());
        assert!(EventType::Click.bubbles());
        assert!(EventType::MouseDown.bubbles());
        assert!(EventType::Input.bubbles());
    }

    #[test]
    fn test_prevent_default() {
        let mut event = DomEvent::new(EventType::MouseDown);
        assert!(!event.is_default_prevented());
        event.prevent_default();
        assert!(event.is_default_prevented());
        assert_eq!(event.phase(), PropagationPhase::Target);
        assert_eq!(event.event_type().to_string(), "mousedown");
    }
}
