//! Browser host built on web-sys
//!
//! The render tree is turned into real DOM once and patched in place after
//! every state change. Patching never recreates the control, so it keeps
//! focus and caret position while the widget re-renders around it.
//!
//! Native focus and blur events fire synchronously from inside `focus()`,
//! `blur()` and DOM mutations. Listeners that fire while the host is busy
//! queue their message, and the host drains the queue before returning.
//! Page code running inside a `ValueChanged` or `FocusChanged` handler gets
//! the same treatment: its writes are queued, and its reads see the state
//! as of the last event.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use async_trait::async_trait;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlInputElement};

use crate::component::{Context, LifecycleManager, Node};
use crate::events::{DomEvent, EventEmitter, EventType};
use crate::kit::components::input::{
    FocusChanged, FocusControl, Input, InputMessage, InputProps, ValueChanged,
};
use crate::kit::theme::Theme;
use crate::platform::{render_root, NativeInput};

/// Marks the stylesheet so it is installed once per document
const STYLESHEET_MARKER: &str = "data-s-input";

/// The rendered `<input>` element
pub struct WebInput {
    element: HtmlInputElement,
}

impl WebInput {
    pub fn new(element: HtmlInputElement) -> Self {
        Self { element }
    }
}

impl NativeInput for WebInput {
    fn focus(&self) {
        if let Err(err) = self.element.focus() {
            log::warn!("focus() rejected: {}", describe(&err));
        }
    }

    fn blur(&self) {
        if let Err(err) = self.element.blur() {
            log::warn!("blur() rejected: {}", describe(&err));
        }
    }

    fn value(&self) -> String {
        self.element.value()
    }
}

fn describe(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|err| String::from(err.message()))
        })
        .unwrap_or_else(|| format!("{err:?}"))
}

fn js_error(err: JsValue) -> crate::Error {
    crate::Error::Platform(describe(&err))
}

/// A DOM listener kept alive for as long as its element is mounted
struct Listener {
    target: Element,
    event_type: EventType,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event_type.as_str(),
            self.closure.as_ref().unchecked_ref(),
        );
    }
}

/// DOM mirror of one render node
struct Mounted {
    element: Element,
    listeners: Vec<Listener>,
    children: Vec<Mounted>,
}

/// Host call made while an event was being handled
type Deferred = Box<dyn FnOnce(&mut Host) -> Result<(), crate::Error>>;

enum Pending {
    Message(InputMessage, EventType),
    Write(Deferred),
}

/// Widget state readable while the host is busy
#[derive(Debug, Clone, Default)]
struct Snapshot {
    value: String,
    has_focus: bool,
}

impl Snapshot {
    fn of(input: &Input) -> Self {
        Self {
            value: input.value(),
            has_focus: input.has_focus(),
        }
    }
}

struct Shared {
    host: RefCell<Option<Host>>,
    pending: RefCell<VecDeque<Pending>>,
    events: EventEmitter,
    snapshot: RefCell<Snapshot>,
}

impl Shared {
    /// Keep the snapshot current while events are still being handled
    fn track(shared: &Weak<Shared>) {
        let Some(this) = shared.upgrade() else {
            return;
        };
        let weak = shared.clone();
        this.events.on(move |changed: &ValueChanged| {
            if let Some(shared) = weak.upgrade() {
                shared.snapshot.borrow_mut().value.clone_from(&changed.value);
            }
        });
        let weak = shared.clone();
        this.events.on(move |changed: &FocusChanged| {
            if let Some(shared) = weak.upgrade() {
                shared.snapshot.borrow_mut().has_focus = changed.has_focus;
            }
        });
    }
}

fn busy() -> crate::Error {
    crate::Error::Platform("input is busy dispatching an event".into())
}

fn unmounted() -> crate::Error {
    crate::Error::Platform("input is unmounted".into())
}

struct Host {
    manager: LifecycleManager<Input>,
    tree: Node<InputMessage>,
    root: Mounted,
    document: Document,
    shared: Weak<Shared>,
}

impl Host {
    fn handle(&mut self, message: InputMessage, event: &mut DomEvent) {
        if let Err(err) = self.manager.handle(message, event) {
            log::warn!("input rejected {message:?}: {err}");
        }
    }

    /// Deliver queued work and patch the DOM until nothing changes
    fn settle(&mut self, shared: &Shared) {
        loop {
            let next = shared.pending.borrow_mut().pop_front();
            match next {
                Some(Pending::Message(message, event_type)) => {
                    self.handle(message, &mut DomEvent::new(event_type));
                    continue;
                }
                Some(Pending::Write(write)) => {
                    if let Err(err) = write(self) {
                        log::warn!("queued input write failed: {err}");
                    }
                    continue;
                }
                None => {}
            }
            if !self.manager.context().scope().take_dirty() {
                break;
            }
            if let Err(err) = self.rerender() {
                log::error!("input re-render failed: {err}");
                break;
            }
        }
        *shared.snapshot.borrow_mut() = Snapshot::of(self.manager.component());
    }

    fn rerender(&mut self) -> Result<(), crate::Error> {
        let tree = render_root(&self.manager)?;
        patch(&self.document, &mut self.root, &self.tree, &tree, &self.shared).map_err(js_error)?;
        self.tree = tree;
        Ok(())
    }
}

/// Deliver a listener message, or queue it when the host is busy
fn dispatch(
    shared: &Rc<Shared>,
    message: InputMessage,
    event_type: EventType,
    native: &web_sys::Event,
) {
    let Ok(mut slot) = shared.host.try_borrow_mut() else {
        shared
            .pending
            .borrow_mut()
            .push_back(Pending::Message(message, event_type));
        return;
    };
    let Some(host) = slot.as_mut() else {
        return;
    };

    let mut event = DomEvent::new(event_type);
    host.handle(message, &mut event);
    if event.is_default_prevented() {
        native.prevent_default();
    }
    if event.is_propagation_stopped() {
        native.stop_propagation();
    }
    host.settle(shared);
}

fn create(
    document: &Document,
    node: &Node<InputMessage>,
    shared: &Weak<Shared>,
) -> Result<Mounted, JsValue> {
    let element = match node.namespace() {
        Some(namespace) => document.create_element_ns(Some(namespace), node.tag())?,
        None => document.create_element(node.tag())?,
    };
    apply_attributes(&element, None, node)?;
    let listeners = listen(&element, node, shared)?;

    let mut children = Vec::new();
    // Slot contents belong to the host page
    if node.slot_name().is_none() {
        for child in node.children() {
            let mounted = create(document, child, shared)?;
            element.append_child(&mounted.element)?;
            children.push(mounted);
        }
    }

    Ok(Mounted {
        element,
        listeners,
        children,
    })
}

fn listen(
    element: &Element,
    node: &Node<InputMessage>,
    shared: &Weak<Shared>,
) -> Result<Vec<Listener>, JsValue> {
    node.listeners()
        .iter()
        .map(|&(event_type, message)| {
            let shared = shared.clone();
            let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
                if let Some(shared) = shared.upgrade() {
                    dispatch(&shared, message, event_type, &event);
                }
            });
            element.add_event_listener_with_callback(
                event_type.as_str(),
                closure.as_ref().unchecked_ref(),
            )?;
            Ok(Listener {
                target: element.clone(),
                event_type,
                closure,
            })
        })
        .collect()
}

fn apply_attributes(
    element: &Element,
    old: Option<&Node<InputMessage>>,
    new: &Node<InputMessage>,
) -> Result<(), JsValue> {
    let class_name = new.class_name();
    if old.map(Node::class_name).unwrap_or_default() != class_name {
        element.set_attribute("class", &class_name)?;
    }

    let control = element.dyn_ref::<HtmlInputElement>();
    for (name, value) in new.attributes() {
        match control {
            // The property tracks what the user typed, the attribute does not
            Some(control) if name == "value" => {
                if control.value() != *value {
                    control.set_value(value);
                }
            }
            _ => {
                if old.and_then(|old| old.attribute(name)) != Some(value.as_str()) {
                    element.set_attribute(name, value)?;
                }
            }
        }
    }

    if let Some(old) = old {
        for name in old.attributes().keys() {
            if !new.has_attribute(name) {
                element.remove_attribute(name)?;
            }
        }
    }
    Ok(())
}

fn same_kind(a: &Node<InputMessage>, b: &Node<InputMessage>) -> bool {
    a.tag() == b.tag()
        && a.namespace() == b.namespace()
        && a.slot_name() == b.slot_name()
        && a.classes().first() == b.classes().first()
}

fn patch(
    document: &Document,
    mounted: &mut Mounted,
    old: &Node<InputMessage>,
    new: &Node<InputMessage>,
    shared: &Weak<Shared>,
) -> Result<(), JsValue> {
    apply_attributes(&mounted.element, Some(old), new)?;
    if old.listeners() != new.listeners() {
        mounted.listeners.clear();
        mounted.listeners = listen(&mounted.element, new, shared)?;
    }
    if new.slot_name().is_some() {
        return Ok(());
    }

    let parent = mounted.element.clone();
    let mut previous: Vec<Option<(Mounted, &Node<InputMessage>)>> =
        std::mem::take(&mut mounted.children)
            .into_iter()
            .zip(old.children())
            .map(Some)
            .collect();

    let mut children = Vec::with_capacity(new.children().len());
    for child in new.children() {
        let reused = previous
            .iter_mut()
            .find(|entry| entry.as_ref().is_some_and(|(_, old)| same_kind(old, child)))
            .and_then(Option::take);
        let mounted_child = match reused {
            Some((mut reused, old_child)) => {
                patch(document, &mut reused, old_child, child, shared)?;
                reused
            }
            None => create(document, child, shared)?,
        };
        children.push(mounted_child);
    }

    for (stale, _) in previous.into_iter().flatten() {
        parent.remove_child(&stale.element)?;
    }

    // Only move what is out of place; moving the control would blur it
    let mut cursor = parent.first_child();
    for child in &children {
        let in_place = cursor
            .as_ref()
            .is_some_and(|current| current.is_same_node(Some(&*child.element)));
        if in_place {
            cursor = cursor.and_then(|current| current.next_sibling());
        } else {
            parent.insert_before(&child.element, cursor.as_ref())?;
        }
    }

    mounted.children = children;
    Ok(())
}

/// Find the DOM element rendered for the first node matching `predicate`
fn find_element(
    mounted: &Mounted,
    node: &Node<InputMessage>,
    predicate: &impl Fn(&Node<InputMessage>) -> bool,
) -> Option<Element> {
    if predicate(node) {
        return Some(mounted.element.clone());
    }
    mounted
        .children
        .iter()
        .zip(node.children())
        .find_map(|(mounted, node)| find_element(mounted, node, predicate))
}

fn install_stylesheet(document: &Document, theme: &Theme) -> Result<(), JsValue> {
    let selector = format!("style[{STYLESHEET_MARKER}]");
    if document.query_selector(&selector)?.is_some() {
        return Ok(());
    }

    let style = document.create_element("style")?;
    style.set_attribute(STYLESHEET_MARKER, "")?;
    style.set_text_content(Some(&theme.input_stylesheet()));
    match document.head() {
        Some(head) => head.append_child(&style)?,
        None => document
            .document_element()
            .ok_or_else(|| JsValue::from_str("document has no root element"))?
            .append_child(&style)?,
    };
    Ok(())
}

/// Handle to an input mounted into the page
#[derive(Clone)]
pub struct InputElement {
    shared: Rc<Shared>,
}

/// Mount an input as the last child of `parent`
pub fn mount_input(parent: &Element, props: InputProps) -> Result<InputElement, crate::Error> {
    mount_input_with_theme(parent, props, &Theme::default())
}

/// Mount an input, installing `theme` if the page has no input stylesheet yet
pub fn mount_input_with_theme(
    parent: &Element,
    props: InputProps,
    theme: &Theme,
) -> Result<InputElement, crate::Error> {
    let document = parent
        .owner_document()
        .ok_or_else(|| crate::Error::Platform("parent is not attached to a document".into()))?;
    install_stylesheet(&document, theme).map_err(js_error)?;

    let context = Context::new();
    let shared = Rc::new(Shared {
        host: RefCell::new(None),
        pending: RefCell::new(VecDeque::new()),
        events: context.events().clone(),
        snapshot: RefCell::new(Snapshot::default()),
    });
    let weak = Rc::downgrade(&shared);

    let mut manager = LifecycleManager::<Input>::new(props, context);
    let tree = render_root(&manager)?;
    let root = create(&document, &tree, &weak).map_err(js_error)?;

    let control = find_element(&root, &tree, &|node: &Node<InputMessage>| node.is_ref())
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
        .ok_or_else(|| crate::Error::Platform("input rendered no native control".into()))?;
    let autofocus = control.has_attribute("autofocus");
    manager
        .component_mut()
        .attach(Box::new(WebInput::new(control)));

    manager.mount()?;
    parent.append_child(&root.element).map_err(js_error)?;
    log::debug!("input mounted into <{}>", parent.tag_name().to_lowercase());

    *shared.snapshot.borrow_mut() = Snapshot::of(manager.component());
    Shared::track(&weak);

    *shared.host.borrow_mut() = Some(Host {
        manager,
        tree,
        root,
        document,
        shared: weak,
    });

    let handle = InputElement { shared };
    if autofocus {
        // Browsers only honour autofocus during page load
        let mut deferred = handle.clone();
        wasm_bindgen_futures::spawn_local(async move { deferred.set_focus().await });
    }
    Ok(handle)
}

impl InputElement {
    /// Apply a host write now, or after the event being handled
    fn write(
        &self,
        apply: impl FnOnce(&mut Host) -> Result<(), crate::Error> + 'static,
    ) -> Result<(), crate::Error> {
        let Ok(mut slot) = self.shared.host.try_borrow_mut() else {
            self.shared
                .pending
                .borrow_mut()
                .push_back(Pending::Write(Box::new(apply)));
            return Ok(());
        };
        let host = slot.as_mut().ok_or_else(unmounted)?;
        let result = apply(host);
        host.settle(&self.shared);
        result
    }

    fn read<R>(
        &self,
        live: impl FnOnce(&Input) -> R,
        settled: impl FnOnce(&Snapshot) -> R,
    ) -> Result<R, crate::Error> {
        match self.shared.host.try_borrow() {
            Ok(slot) => slot
                .as_ref()
                .map(|host| live(host.manager.component()))
                .ok_or_else(unmounted),
            Err(_) => Ok(settled(&self.shared.snapshot.borrow())),
        }
    }

    /// Emitter carrying `ValueChanged` and `FocusChanged`
    ///
    /// Handlers may read and write the input. Writes made from a handler
    /// take effect once the current event has been handled.
    pub fn events(&self) -> &EventEmitter {
        &self.shared.events
    }

    pub fn value(&self) -> Result<String, crate::Error> {
        self.read(Input::value, |snapshot| snapshot.value.clone())
    }

    pub fn has_focus(&self) -> Result<bool, crate::Error> {
        self.read(Input::has_focus, |snapshot| snapshot.has_focus)
    }

    /// Write the `value` attribute
    pub fn set_value(&self, value: impl Into<String>) -> Result<(), crate::Error> {
        let value = value.into();
        self.write(move |host| {
            host.manager.component_mut().set_value(value);
            Ok(())
        })
    }

    /// Replace all attributes
    pub fn set_props(&self, props: InputProps) -> Result<(), crate::Error> {
        self.write(move |host| Ok(host.manager.update(props)?))
    }

    /// Write or remove one attribute by its markup name
    pub fn set_attribute(&self, name: &str, value: Option<&str>) -> Result<(), crate::Error> {
        let name = name.to_string();
        let value = value.map(str::to_string);
        self.write(move |host| {
            let mut props = host.manager.component().props();
            props.set_attribute(&name, value.as_deref());
            Ok(host.manager.update(props)?)
        })
    }

    /// The `<slot>` element a page fills to project content into `name`
    pub fn slot(&self, name: &str) -> Result<Option<Element>, crate::Error> {
        let slot = self.shared.host.try_borrow().map_err(|_| busy())?;
        let host = slot.as_ref().ok_or_else(unmounted)?;
        Ok(find_element(&host.root, &host.tree, &|node: &Node<InputMessage>| {
            node.slot_name() == Some(name)
        }))
    }

    /// Remove the widget from the page
    pub fn unmount(self) -> Result<(), crate::Error> {
        let mut slot = self.shared.host.try_borrow_mut().map_err(|_| busy())?;
        let Some(mut host) = slot.take() else {
            return Ok(());
        };
        drop(slot);

        host.manager.unmount()?;
        host.root.element.remove();
        self.shared.pending.borrow_mut().clear();
        self.shared.events.clear();
        Ok(())
    }
}

#[async_trait(?Send)]
impl FocusControl for InputElement {
    async fn set_focus(&mut self) {
        let request = self.write(|host| {
            host.manager.component().request_focus();
            Ok(())
        });
        if let Err(err) = request {
            log::warn!("set_focus: {err}");
        }
    }

    async fn remove_focus(&mut self) {
        let request = self.write(|host| {
            host.manager.component().request_blur();
            Ok(())
        });
        if let Err(err) = request {
            log::warn!("remove_focus: {err}");
        }
    }
}
