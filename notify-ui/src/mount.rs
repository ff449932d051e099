#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use notify_core::{ControllerConfig, NotificationsController, Task};
use notify_wasm::FetchApi;
use tracing::{debug, error};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, MouseEvent, Node};
use yew::Callback;

use crate::styles;
use crate::view::DomView;

type DomController = NotificationsController<FetchApi, DomView>;

#[wasm_bindgen(start)]
pub fn start() {
    notify_wasm::init_diagnostics();
    debug!("notifications module loaded");
}

fn spawn(controller: &Rc<DomController>, task: Task) {
    let controller = Rc::clone(controller);
    wasm_bindgen_futures::spawn_local(async move { controller.run(task).await });
}

/// A wired-up bell. Dropping it removes the listeners and stops polling.
struct Mounted {
    controller: Rc<DomController>,
    document: Document,
    bell: HtmlElement,
    on_bell_click: Closure<dyn FnMut(MouseEvent)>,
    on_document_click: Closure<dyn FnMut(MouseEvent)>,
    _poll: Interval,
}

impl Mounted {
    /// Registers the listeners. On error the caller drops `self`, which
    /// unregisters whatever was attached.
    fn attach(&self) -> Result<(), JsValue> {
        self.bell.add_event_listener_with_callback(
            "click",
            self.on_bell_click.as_ref().unchecked_ref(),
        )?;
        self.document.add_event_listener_with_callback(
            "click",
            self.on_document_click.as_ref().unchecked_ref(),
        )?;
        Ok(())
    }
}

impl Drop for Mounted {
    fn drop(&mut self) {
        self.controller.dispose();
        let _ = self.bell.remove_event_listener_with_callback(
            "click",
            self.on_bell_click.as_ref().unchecked_ref(),
        );
        let _ = self.document.remove_event_listener_with_callback(
            "click",
            self.on_document_click.as_ref().unchecked_ref(),
        );
        self.controller.view().teardown();
        debug!("notifications bell disposed");
    }
}

/// Wires the bell. `Ok(None)` when the page has no bell.
fn mount(document: &Document, config: ControllerConfig) -> Result<Option<Mounted>, JsValue> {
    let Some(bell) = document.get_element_by_id(&config.anchors.bell) else {
        debug!(id = %config.anchors.bell, "no notifications bell on this page");
        return Ok(None);
    };
    let bell: HtmlElement = bell
        .dyn_into()
        .map_err(|_| JsValue::from_str("Notifications bell is not an HTML element"))?;
    let panel = document
        .get_element_by_id(&config.anchors.panel)
        .ok_or_else(|| JsValue::from_str("Notifications panel not found"))?;
    let badge = document
        .get_element_by_id(&config.anchors.badge)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());

    styles::ensure_styles(document, &config.style_marker_id)?;

    let poll_ms = u32::try_from(config.poll_interval.as_millis()).unwrap_or(u32::MAX);

    let view = DomView::new(document.clone(), panel.clone(), badge, &config);
    let api = FetchApi::new(&config);
    let controller = Rc::new(NotificationsController::new(api, view, config));

    let weak = Rc::downgrade(&controller);
    controller.view().bind_delete(Callback::from(move |id: i64| {
        if let Some(controller) = weak.upgrade() {
            spawn(&controller, Task::Delete(id));
        }
    }));

    let on_bell_click = {
        let controller = Rc::clone(&controller);
        Closure::wrap(Box::new(move |event: MouseEvent| {
            event.stop_propagation();
            for task in controller.toggle() {
                spawn(&controller, task);
            }
        }) as Box<dyn FnMut(MouseEvent)>)
    };

    let on_document_click = {
        let controller = Rc::clone(&controller);
        let bell_node: Node = bell.clone().into();
        Closure::wrap(Box::new(move |event: MouseEvent| {
            let inside = event
                .target()
                .and_then(|target| target.dyn_into::<Node>().ok())
                .map(|node| panel.contains(Some(&node)) || node.is_same_node(Some(&bell_node)))
                .unwrap_or(false);
            controller.outside_click(inside);
        }) as Box<dyn FnMut(MouseEvent)>)
    };

    let poll = {
        let controller = Rc::clone(&controller);
        Interval::new(poll_ms, move || spawn(&controller, Task::CheckForUpdates))
    };

    let mounted = Mounted {
        controller,
        document: document.clone(),
        bell,
        on_bell_click,
        on_document_click,
        _poll: poll,
    };
    mounted.attach()?;

    spawn(&mounted.controller, Task::Load);
    Ok(Some(mounted))
}

/// `DOMContentLoaded` listener waiting to mount.
struct PendingMount {
    document: Document,
    listener: Closure<dyn FnMut()>,
}

impl Drop for PendingMount {
    fn drop(&mut self) {
        let _ = self.document.remove_event_listener_with_callback(
            "DOMContentLoaded",
            self.listener.as_ref().unchecked_ref(),
        );
    }
}

/// Page-owned handle to the notification bell.
#[wasm_bindgen]
pub struct NotificationsHandle {
    mounted: Rc<RefCell<Option<Mounted>>>,
    pending: Option<PendingMount>,
}

#[wasm_bindgen]
impl NotificationsHandle {
    /// Whether a bell is currently wired.
    pub fn is_mounted(&self) -> bool {
        self.mounted.borrow().is_some()
    }

    /// Reloads the list outside the regular schedule.
    pub fn refresh(&self) {
        if let Some(mounted) = self.mounted.borrow().as_ref() {
            spawn(&mounted.controller, Task::Load);
        }
    }

    /// Stops polling, removes listeners and unmounts the list. Safe to call twice.
    pub fn dispose(&mut self) {
        self.pending = None;
        let mounted = self.mounted.borrow_mut().take();
        drop(mounted);
    }
}

/// Mounts the bell now, or once the document has been parsed.
#[wasm_bindgen]
pub fn mount_notifications(config: Option<JsValue>) -> Result<NotificationsHandle, JsValue> {
    let config = notify_wasm::config_from_js(config)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("No document"))?;

    let mounted = Rc::new(RefCell::new(None));

    if document.ready_state() != "loading" {
        *mounted.borrow_mut() = mount(&document, config)?;
        return Ok(NotificationsHandle {
            mounted,
            pending: None,
        });
    }

    let listener = {
        let mounted = Rc::clone(&mounted);
        let document = document.clone();
        Closure::wrap(Box::new(move || {
            if mounted.borrow().is_some() {
                return;
            }
            match mount(&document, config.clone()) {
                Ok(next) => *mounted.borrow_mut() = next,
                Err(err) => error!(?err, "failed to mount notifications bell"),
            }
        }) as Box<dyn FnMut()>)
    };
    document
        .add_event_listener_with_callback("DOMContentLoaded", listener.as_ref().unchecked_ref())?;

    Ok(NotificationsHandle {
        mounted,
        pending: Some(PendingMount { document, listener }),
    })
}
