//! Headless host
//!
//! Mounts an `Input` without a browser. The simulated native control
//! follows the browser rules the component relies on: `focus()` and
//! `blur()` raise focus events asynchronously to the caller, a mouse press
//! moves focus unless its default is prevented, disabled controls cannot be
//! focused and lose focus when disabled, and typing edits the live value
//! before raising `input`.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;

use crate::component::{ComponentError, Context, LifecycleManager, Node};
use crate::events::{DomEvent, EventEmitter, EventType, PropagationPhase};
use crate::kit::components::input::{classes, FocusControl, Input, InputMessage, InputProps};
use crate::platform::{render_root, NativeInput};

#[derive(Debug, Default)]
struct NativeState {
    focused: bool,
    disabled: bool,
    readonly: bool,
    value: String,
}

/// Simulated native input element
#[derive(Debug, Clone, Default)]
pub struct HeadlessInput {
    state: Rc<RefCell<NativeState>>,
    /// Native events waiting for the host to deliver them
    pending: Rc<RefCell<VecDeque<EventType>>>,
}

impl HeadlessInput {
    pub fn is_focused(&self) -> bool {
        self.state.borrow().focused
    }

    pub fn is_disabled(&self) -> bool {
        self.state.borrow().disabled
    }

    fn is_editable(&self) -> bool {
        let state = self.state.borrow();
        state.focused && !state.disabled && !state.readonly
    }

    fn raise(&self, event: EventType) {
        self.pending.borrow_mut().push_back(event);
    }

    fn next_event(&self) -> Option<EventType> {
        self.pending.borrow_mut().pop_front()
    }
}

impl NativeInput for HeadlessInput {
    fn focus(&self) {
        let mut state = self.state.borrow_mut();
        if state.focused || state.disabled {
            return;
        }
        state.focused = true;
        self.raise(EventType::Focus);
    }

    fn blur(&self) {
        let mut state = self.state.borrow_mut();
        if !state.focused {
            return;
        }
        state.focused = false;
        self.raise(EventType::Blur);
    }

    fn value(&self) -> String {
        self.state.borrow().value.clone()
    }
}

/// Listener messages along an event route, target first
type Route = Vec<(PropagationPhase, Vec<InputMessage>)>;

/// Hosts one mounted `Input` against a simulated native control
pub struct HeadlessHost {
    manager: LifecycleManager<Input>,
    tree: Node<InputMessage>,
    native: HeadlessInput,
    /// Native events delivered to the control, in order
    delivered: Vec<EventType>,
}

impl HeadlessHost {
    /// Create, render, bind and mount an input
    pub fn mount(props: InputProps) -> Result<Self, crate::Error> {
        let mut manager = LifecycleManager::<Input>::new(props, Context::new());
        let tree = render_root(&manager)?;

        let native = HeadlessInput::default();
        manager.component_mut().attach(Box::new(native.clone()));
        manager.mount()?;

        let mut host = Self {
            manager,
            tree,
            native,
            delivered: Vec::new(),
        };
        host.sync_native();
        if host.tree.find_ref().is_some_and(|c| c.has_attribute("autofocus")) {
            host.native.focus();
        }
        host.settle()?;
        Ok(host)
    }

    pub fn input(&self) -> &Input {
        self.manager.component()
    }

    /// The current render tree
    pub fn tree(&self) -> &Node<InputMessage> {
        &self.tree
    }

    pub fn native(&self) -> &HeadlessInput {
        &self.native
    }

    /// Native events delivered so far
    pub fn delivered(&self) -> &[EventType] {
        &self.delivered
    }

    /// Emitter carrying `ValueChanged` and `FocusChanged`
    pub fn events(&self) -> &EventEmitter {
        self.manager.context().events()
    }

    pub fn value(&self) -> String {
        self.input().value()
    }

    /// Write the `value` attribute
    pub fn set_value(&mut self, value: impl Into<String>) -> Result<(), crate::Error> {
        self.manager.component_mut().set_value(value);
        self.settle()
    }

    /// Replace all attributes
    pub fn set_props(&mut self, props: InputProps) -> Result<(), crate::Error> {
        self.manager.update(props)?;
        self.settle()
    }

    /// Press and release the mouse on the first element carrying `class`
    ///
    /// Returns false when no such element is rendered.
    pub fn click(&mut self, class: &str) -> Result<bool, crate::Error> {
        let on_target = |node: &Node<InputMessage>| node.has_class(class);
        let Some(mouse_down) = self.route(&on_target, EventType::MouseDown) else {
            return Ok(false);
        };

        if !self.dispatch(mouse_down, EventType::MouseDown)? {
            // Default action: focus follows the press
            if class == classes::CONTROL {
                self.native.focus();
            } else {
                self.native.blur();
            }
        }
        self.settle()?;

        if let Some(click) = self.route(&on_target, EventType::Click) {
            self.dispatch(click, EventType::Click)?;
        }
        self.settle()?;
        Ok(true)
    }

    /// Type into the control; returns false when it does not accept input
    pub fn type_text(&mut self, text: &str) -> Result<bool, crate::Error> {
        if !self.native.is_editable() {
            return Ok(false);
        }
        for ch in text.chars() {
            self.native.state.borrow_mut().value.push(ch);
            self.dispatch_to_control(EventType::Input)?;
            self.settle()?;
        }
        Ok(true)
    }

    /// Move focus to the control the way tabbing into it would
    pub fn focus_control(&mut self) -> Result<(), crate::Error> {
        self.native.focus();
        self.settle()
    }

    /// Move focus away from the control
    pub fn blur_control(&mut self) -> Result<(), crate::Error> {
        self.native.blur();
        self.settle()
    }

    /// Unmount and hand back the component
    pub fn unmount(mut self) -> Result<Input, crate::Error> {
        self.manager.unmount()?;
        Ok(self.manager.into_component())
    }

    fn route(
        &self,
        target: &impl Fn(&Node<InputMessage>) -> bool,
        event_type: EventType,
    ) -> Option<Route> {
        let path = self.tree.path_to(target)?;
        let route = path
            .iter()
            .rev()
            .enumerate()
            .take_while(|(depth, _)| *depth == 0 || event_type.bubbles())
            .map(|(depth, node)| {
                let phase = if depth == 0 {
                    PropagationPhase::Target
                } else {
                    PropagationPhase::Bubbling
                };
                (phase, node.listeners_for(event_type).copied().collect())
            })
            .collect();
        Some(route)
    }

    /// Run a route through the component; returns whether the default was prevented
    fn dispatch(&mut self, route: Route, event_type: EventType) -> Result<bool, ComponentError> {
        let mut event = DomEvent::new(event_type);
        for (phase, messages) in route {
            event.set_phase(phase);
            for message in messages {
                self.manager.handle(message, &mut event)?;
            }
            if event.is_propagation_stopped() {
                break;
            }
        }
        Ok(event.is_default_prevented())
    }

    fn dispatch_to_control(&mut self, event_type: EventType) -> Result<(), ComponentError> {
        self.delivered.push(event_type);
        if let Some(route) = self.route(&|node: &Node<InputMessage>| node.is_ref(), event_type) {
            self.dispatch(route, event_type)?;
        }
        Ok(())
    }

    /// Deliver pending native events and re-render until nothing changes
    fn settle(&mut self) -> Result<(), crate::Error> {
        loop {
            while let Some(event_type) = self.native.next_event() {
                self.dispatch_to_control(event_type)?;
            }
            if !self.manager.context().scope().take_dirty() {
                return Ok(());
            }
            self.tree = render_root(&self.manager)?;
            self.sync_native();
        }
    }

    /// Apply rendered control attributes to the native element
    fn sync_native(&mut self) {
        let Some(control) = self.tree.find_ref() else {
            return;
        };
        let mut state = self.native.state.borrow_mut();
        state.disabled = control.has_attribute("disabled");
        state.readonly = control.has_attribute("readonly");
        if let Some(value) = control.attribute("value") {
            if state.value != value {
                state.value = value.to_string();
            }
        }
        if state.disabled && state.focused {
            state.focused = false;
            drop(state);
            self.native.raise(EventType::Blur);
        }
    }
}

#[async_trait(?Send)]
impl FocusControl for HeadlessHost {
    async fn set_focus(&mut self) {
        self.manager.component().request_focus();
        if let Err(err) = self.settle() {
            log::warn!("set_focus: {err}");
        }
    }

    async fn remove_focus(&mut self) {
        self.manager.component().request_blur();
        if let Err(err) = self.settle() {
            log::warn!("remove_focus: {err}");
        }
    }
}
