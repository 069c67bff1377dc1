// Browser tests for the DOM host
//
// Run with `wasm-pack test --headless --chrome -- --features web`.
#![cfg(all(target_arch = "wasm32", feature = "web"))]

use std::cell::RefCell;
use std::rc::Rc;

use s_input::prelude::*;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement};

wasm_bindgen_test_configure!(run_in_browser);

fn fixture() -> (Document, Element) {
    let document = web_sys::window().unwrap().document().unwrap();
    let parent = document.create_element("div").unwrap();
    document.body().unwrap().append_child(&parent).unwrap();
    (document, parent)
}

fn control(parent: &Element) -> HtmlInputElement {
    parent
        .query_selector(".s-input__control")
        .unwrap()
        .expect("control is rendered")
        .dyn_into()
        .unwrap()
}

fn fire(target: &Element, name: &str) {
    let event = Event::new(name).unwrap();
    target.dispatch_event(&event).unwrap();
}

fn type_into(native: &HtmlInputElement, text: &str) {
    native.set_value(text);
    fire(native, "input");
}

#[wasm_bindgen_test]
async fn test_clear_keeps_focus_on_the_same_control() {
    let (document, parent) = fixture();
    let mut input = mount_input(
        &parent,
        InputProps {
            clearable: true,
            ..InputProps::default()
        },
    )
    .unwrap();
    let native = control(&parent);
    let native_node: &web_sys::Node = native.as_ref();

    // The focus event fires inside focus() and is delivered afterwards
    input.set_focus().await;
    assert!(input.has_focus().unwrap());

    type_into(&native, "abc");
    assert_eq!(input.value().unwrap(), "abc");
    let clear = parent
        .query_selector(".s-input__clear")
        .unwrap()
        .expect("clear button once there is text");

    fire(&clear, "mousedown");
    clear.dyn_ref::<HtmlElement>().unwrap().click();

    assert_eq!(input.value().unwrap(), "");
    assert_eq!(native.value(), "");
    assert!(parent.query_selector(".s-input__clear").unwrap().is_none());
    assert!(control(&parent).is_same_node(Some(native_node)));
    let active = document.active_element().expect("an element has focus");
    assert!(active.is_same_node(Some(native_node)));
    assert!(input.has_focus().unwrap());

    input.unmount().unwrap();
}

#[wasm_bindgen_test]
async fn test_set_focus_and_remove_focus() {
    let (_, parent) = fixture();
    let mut input = mount_input(&parent, InputProps::default()).unwrap();
    let root = parent.query_selector(".s-input").unwrap().unwrap();

    input.set_focus().await;
    assert!(input.has_focus().unwrap());
    assert!(root.class_name().contains("s-input--focused"));

    input.remove_focus().await;
    assert!(!input.has_focus().unwrap());
    assert!(!root.class_name().contains("s-input--focused"));

    input.unmount().unwrap();
}

#[wasm_bindgen_test]
fn test_stylesheet_installed_once() {
    let (document, first) = fixture();
    let (_, second) = fixture();
    let a = mount_input(&first, InputProps::default()).unwrap();
    let b = mount_input(&second, InputProps::default()).unwrap();

    let selector = "style[data-s-input]";
    let style = document
        .query_selector(selector)
        .unwrap()
        .expect("stylesheet installed");
    style.remove();
    assert!(document.query_selector(selector).unwrap().is_none());

    a.unmount().unwrap();
    b.unmount().unwrap();
}

#[wasm_bindgen_test]
async fn test_autofocus_is_deferred() {
    let (_, parent) = fixture();
    let input = mount_input(
        &parent,
        InputProps {
            autofocus: Some(true),
            ..InputProps::default()
        },
    )
    .unwrap();
    assert!(!input.has_focus().unwrap());

    // Let the spawned focus request run
    JsFuture::from(js_sys::Promise::resolve(&JsValue::UNDEFINED))
        .await
        .unwrap();
    assert!(input.has_focus().unwrap());

    input.unmount().unwrap();
}

#[wasm_bindgen_test]
fn test_handler_reads_and_writes_are_not_rejected() {
    let (_, parent) = fixture();
    let input = mount_input(&parent, InputProps::default()).unwrap();
    let reads = Rc::new(RefCell::new(Vec::new()));

    let echo = input.clone();
    let sink = reads.clone();
    input.events().on(move |changed: &ValueChanged| {
        sink.borrow_mut().push(echo.value());
        if changed.value == "abc" {
            sink.borrow_mut().push(echo.set_value("ABC").map(|()| String::new()));
        }
    });

    type_into(&control(&parent), "abc");

    let reads = reads.borrow();
    assert_eq!(reads.len(), 2);
    assert_eq!(reads[0].as_deref().unwrap(), "abc");
    assert!(reads[1].is_ok());
    assert_eq!(input.value().unwrap(), "ABC");
    assert_eq!(control(&parent).value(), "ABC");

    input.unmount().unwrap();
}

#[wasm_bindgen_test]
fn test_slots_attributes_and_unmount() {
    let (_, parent) = fixture();
    let input = mount_input(&parent, InputProps::default()).unwrap();

    let prefix = input.slot("prefix").unwrap().expect("prefix slot");
    assert_eq!(prefix.get_attribute("name").as_deref(), Some("prefix"));
    assert!(input.slot("missing").unwrap().is_none());

    input.set_attribute("size", Some("large")).unwrap();
    assert!(parent.query_selector(".s-input--large").unwrap().is_some());
    assert!(parent.query_selector(".s-input--medium").unwrap().is_none());

    input.set_attribute("placeholder", Some("Search")).unwrap();
    assert_eq!(
        control(&parent).get_attribute("placeholder").as_deref(),
        Some("Search")
    );

    input.unmount().unwrap();
    assert_eq!(parent.child_element_count(), 0);
}
