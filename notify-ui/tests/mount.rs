#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use notify_ui::mount_notifications;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, Event, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window()
        .and_then(|window| window.document())
        .expect("test page has a document")
}

fn add_element(document: &Document, tag: &str, id: &str) -> Element {
    let element = document.create_element(tag).expect("element created");
    element.set_id(id);
    document
        .body()
        .expect("test page has a body")
        .append_child(&element)
        .expect("element appended");
    element
}

fn click(element: &Element) {
    element
        .clone()
        .dyn_into::<HtmlElement>()
        .expect("html element")
        .click();
}

#[wasm_bindgen_test]
fn failed_mount_leaves_no_listeners_behind() {
    let document = document();
    let bell = add_element(&document, "button", "notifications-bell");
    let panel = add_element(&document, "div", "notifications-dropdown-menu");

    let errors = Rc::new(Cell::new(0));
    let on_error = {
        let errors = Rc::clone(&errors);
        Closure::wrap(Box::new(move |_: Event| errors.set(errors.get() + 1)) as Box<dyn FnMut(Event)>)
    };
    let window = web_sys::window().expect("window");
    window
        .add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())
        .expect("error listener attached");

    // Without a <head> the style block cannot be injected and mounting fails.
    let head = document.head().expect("test page has a head");
    head.remove();
    assert!(mount_notifications(None).is_err());

    let root = document.document_element().expect("root element");
    root.insert_before(&head, root.first_child().as_ref())
        .expect("head restored");

    click(&bell);
    assert_eq!(errors.get(), 0);
    assert!(!panel.class_list().contains("show"));

    let mut handle = mount_notifications(None).expect("mount succeeds");
    assert!(handle.is_mounted());
    assert!(document.get_element_by_id("notifications-styles").is_some());

    click(&bell);
    assert!(panel.class_list().contains("show"));
    assert_eq!(errors.get(), 0);

    handle.dispose();
    assert!(!handle.is_mounted());
    click(&bell);
    assert!(panel.class_list().contains("show"));
    assert_eq!(errors.get(), 0);

    let _ = window.remove_event_listener_with_callback("error", on_error.as_ref().unchecked_ref());
    bell.remove();
    panel.remove();
}
