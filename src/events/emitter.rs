//! Event emitter for component events

use std::any::TypeId;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::events::Event;

/// Type for event handler callbacks
type EventCallback = Rc<dyn Fn(&dyn Event)>;

/// Event emitter for handling component events
///
/// Handlers run on the thread that emits; the emitter is shared between
/// clones of a `Context`.
#[derive(Clone, Default)]
pub struct EventEmitter {
    /// Event handlers grouped by event type
    handlers: Rc<RefCell<HashMap<TypeId, Vec<EventCallback>>>>,
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("handlers", &"[EventHandlers]")
            .finish()
    }
}

impl EventEmitter {
    /// Create a new event emitter
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event handler
    pub fn on<E: Event + 'static>(&self, handler: impl Fn(&E) + 'static) {
        let callback: EventCallback = Rc::new(move |event| {
            if let Some(typed_event) = event.as_any().downcast_ref::<E>() {
                handler(typed_event);
            }
        });

        self.handlers
            .borrow_mut()
            .entry(TypeId::of::<E>())
            .or_default()
            .push(callback);
    }

    /// Emit an event
    pub fn emit<E: Event>(&self, event: &E) {
        // Handlers may register further handlers, so release the map first.
        let handlers = self
            .handlers
            .borrow()
            .get(&TypeId::of::<E>())
            .cloned()
            .unwrap_or_default();

        for handler in handlers {
            handler(event);
        }
    }

    /// Remove all handlers
    pub fn clear(&self) {
        self.handlers.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Clone)]
    struct Ping(u32);

    #[derive(Clone)]
    struct Pong;

    #[test]
    fn test_emit_reaches_typed_handlers_only() {
        let emitter = EventEmitter::new();
        let pings = Rc::new(Cell::new(0));
        let pings_clone = pings.clone();

        emitter.on::<Ping>(move |ping| pings_clone.set(pings_clone.get() + ping.0));
        emitter.emit(&Ping(2));
        emitter.emit(&Pong);
        emitter.emit(&Ping(3));

        assert_eq!(pings.get(), 5);
    }

    #[test]
    fn test_handler_may_subscribe_during_emit() {
        let emitter = EventEmitter::new();
        let inner = emitter.clone();
        let pongs = Rc::new(Cell::new(0));
        let pongs_clone = pongs.clone();

        emitter.on::<Ping>(move |_| {
            let pongs = pongs_clone.clone();
            inner.on::<Pong>(move |_| pongs.set(pongs.get() + 1));
        });
        emitter.emit(&Ping(1));
        emitter.emit(&Pong);

        assert_eq!(pongs.get(), 1);
    }

    #[test]
    fn test_clear() {
        let emitter = EventEmitter::new();
        let pings = Rc::new(Cell::new(0));
        let pings_clone = pings.clone();
        emitter.on::<Ping>(move |_| pings_clone.set(pings_clone.get() + 1));

        emitter.clear();
        emitter.emit(&Ping(1));
        assert_eq!(pings.get(), 0);
    }
}
