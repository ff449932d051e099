#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::time::Duration;

use gloo_timers::future::TimeoutFuture;
use notify_core::{Badge, ControllerConfig, ListState, Listing, NotificationsView};
use tracing::error;
use web_sys::{Document, Element, HtmlElement};
use yew::{AppHandle, AttrValue, Callback};

use crate::list::{NotificationList, NotificationListProps};

/// Writes controller state into the page's panel, badge and list container.
pub struct DomView {
    document: Document,
    panel: Element,
    badge: Option<HtmlElement>,
    list_id: String,
    visible_class: String,
    notifications_page: String,
    empty_label: AttrValue,
    delete_label: AttrValue,
    on_delete: RefCell<Callback<i64>>,
    app: RefCell<Option<AppHandle<NotificationList>>>,
    state: RefCell<ListState>,
}

impl DomView {
    pub fn new(
        document: Document,
        panel: Element,
        badge: Option<HtmlElement>,
        config: &ControllerConfig,
    ) -> Self {
        Self {
            document,
            panel,
            badge,
            list_id: config.anchors.list.clone(),
            visible_class: config.visible_class.clone(),
            notifications_page: config.notifications_page.clone(),
            empty_label: AttrValue::from(config.empty_label.clone()),
            delete_label: AttrValue::from(config.delete_label.clone()),
            on_delete: RefCell::new(Callback::noop()),
            app: RefCell::new(None),
            state: RefCell::new(ListState::default()),
        }
    }

    /// Sets what a row's delete button does. Bound after the controller exists.
    ///
    /// The container keeps whatever the page put there until the first load renders.
    pub fn bind_delete(&self, on_delete: Callback<i64>) {
        *self.on_delete.borrow_mut() = on_delete;
    }

    /// Unmounts the list component. Tasks still in flight touch nothing afterwards.
    pub fn teardown(&self) {
        self.state.borrow_mut().close();
        let app = self.app.borrow_mut().take();
        if let Some(app) = app {
            app.destroy();
        }
    }

    fn is_torn_down(&self) -> bool {
        self.state.borrow().is_closed()
    }

    fn props(&self) -> Option<NotificationListProps> {
        let state = self.state.borrow();
        let (listing, dismissing) = state.drawable()?;
        let page = self.notifications_page.clone();
        Some(NotificationListProps {
            listing: listing.clone(),
            dismissing,
            on_delete: self.on_delete.borrow().clone(),
            on_open_page: Callback::from(move |_| open_page(&page)),
            empty_label: self.empty_label.clone(),
            delete_label: self.delete_label.clone(),
        })
    }

    fn refresh(&self) {
        let Some(props) = self.props() else {
            return;
        };
        let mut app = self.app.borrow_mut();
        if let Some(handle) = app.as_mut() {
            handle.update(props);
            return;
        }

        // Nothing to draw into until the page has a list container.
        let Some(container) = self.document.get_element_by_id(&self.list_id) else {
            return;
        };
        container.set_inner_html("");
        *app = Some(
            yew::Renderer::<NotificationList>::with_root_and_props(container, props).render(),
        );
    }
}

impl NotificationsView for DomView {
    fn set_panel_visible(&self, visible: bool) {
        if self.is_torn_down() {
            return;
        }
        let classes = self.panel.class_list();
        let result = if visible {
            classes.add_1(&self.visible_class)
        } else {
            classes.remove_1(&self.visible_class)
        };
        if let Err(err) = result {
            error!(?err, "failed to toggle notifications panel");
        }
    }

    fn set_badge(&self, badge: &Badge) {
        let Some(element) = &self.badge else {
            return;
        };
        if self.is_torn_down() {
            return;
        }
        let style = element.style();
        let result = match badge {
            Badge::Visible(text) => {
                element.set_text_content(Some(text));
                style.set_property("display", "inline-block")
            }
            Badge::Hidden => style.set_property("display", "none"),
        };
        if let Err(err) = result {
            error!(?err, "failed to update notifications badge");
        }
    }

    fn render(&self, listing: Listing) {
        if self.state.borrow_mut().show(listing) {
            self.refresh();
        }
    }

    async fn dismiss(&self, id: i64, delay: Duration) {
        if !self.state.borrow_mut().begin_dismiss(id) {
            return;
        }
        self.refresh();

        TimeoutFuture::new(u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)).await;

        if self.state.borrow_mut().finish_dismiss(id) {
            self.refresh();
        }
    }
}

fn open_page(path: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(err) = window.location().set_href(path) {
        error!(?err, path, "failed to open notifications page");
    }
}
