//! Scope-based reactive state
//!
//! Signals belong to a `ReactiveScope`. Writing a signal marks the scope
//! dirty; the host that owns the scope re-renders and clears the flag.

use std::{
    cell::{Cell, Ref, RefCell},
    rc::Rc,
};

/// Reactive scope shared by the signals of one component
#[derive(Debug, Clone, Default)]
pub struct ReactiveScope {
    dirty: Rc<Cell<bool>>,
}

impl ReactiveScope {
    /// Create a new reactive scope
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new signal with an initial value
    pub fn signal<T: 'static>(&self, initial_value: T) -> Signal<T> {
        Signal {
            value: Rc::new(RefCell::new(initial_value)),
            scope: self.clone(),
        }
    }

    /// Request a render without changing a signal
    pub fn mark_dirty(&self) {
        self.dirty.set(true);
    }

    /// Read and clear the dirty flag
    pub fn take_dirty(&self) -> bool {
        self.dirty.replace(false)
    }
}

/// A reactive signal that holds a value
pub struct Signal<T> {
    value: Rc<RefCell<T>>,
    scope: ReactiveScope,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            scope: self.scope.clone(),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Signal").field(&*self.value.borrow()).finish()
    }
}

impl<T> Signal<T> {
    /// Get the current value of the signal
    pub fn get(&self) -> Ref<'_, T> {
        self.value.borrow()
    }

    /// Set the signal's value and mark the scope dirty
    pub fn set(&self, value: T) {
        *self.value.borrow_mut() = value;
        self.scope.mark_dirty();
    }

    /// Update the signal's value with a function
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        f(&mut *self.value.borrow_mut());
        self.scope.mark_dirty();
    }
}

impl<T: PartialEq> Signal<T> {
    /// Set the value only if it differs; returns whether it changed
    pub fn replace_if_changed(&self, value: T) -> bool {
        if *self.value.borrow() == value {
            return false;
        }
        self.set(value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_creation_and_access() {
        let scope = ReactiveScope::new();
        let signal = scope.signal(42);

        assert_eq!(*signal.get(), 42);
        assert!(!scope.take_dirty());
    }

    #[test]
    fn test_signal_update_marks_scope() {
        let scope = ReactiveScope::new();
        let signal = scope.signal(10);

        signal.update(|v| *v += 5);
        assert_eq!(*signal.get(), 15);
        assert!(scope.take_dirty());
        assert!(!scope.take_dirty());
    }

    #[test]
    fn test_replace_if_changed() {
        let scope = ReactiveScope::new();
        let signal = scope.signal(String::from("a"));

        assert!(!signal.replace_if_changed("a".to_string()));
        assert!(!scope.take_dirty());
        assert!(signal.replace_if_changed("b".to_string()));
        assert!(scope.take_dirty());
        assert_eq!(signal.get().as_str(), "b");
    }

    #[test]
    fn test_clones_share_value() {
        let scope = ReactiveScope::new();
        let signal = scope.signal(false);
        let other = signal.clone();

        other.set(true);
        assert!(*signal.get());
    }
}
