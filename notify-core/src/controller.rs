use std::cell::Cell;
use std::time::Duration;

use tracing::{debug, error};

use crate::{Badge, ControllerConfig, Listing, NotificationList, NotifyError};

/// Backend operations the controller and the CLI rely on.
#[allow(async_fn_in_trait)]
pub trait NotificationsApi {
    async fn list(&self, limit: u32, offset: u32) -> Result<NotificationList, NotifyError>;
    async fn count(&self) -> Result<i64, NotifyError>;
    /// The response body carries no meaning; only transport failures are errors.
    async fn mark_all_read(&self) -> Result<(), NotifyError>;
    async fn mark_read(&self, id: i64) -> Result<bool, NotifyError>;
    async fn delete(&self, id: i64) -> Result<bool, NotifyError>;
    async fn delete_all(&self) -> Result<bool, NotifyError>;
}

/// Where the controller writes its state.
#[allow(async_fn_in_trait)]
pub trait NotificationsView {
    fn set_panel_visible(&self, visible: bool);
    fn set_badge(&self, badge: &Badge);
    fn render(&self, listing: Listing);
    /// Animates the row for `id` out and removes it once `delay` has passed.
    async fn dismiss(&self, id: i64, delay: Duration);
}

/// Asynchronous work the controller asks its host to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Load,
    MarkAllRead,
    Delete(i64),
    CheckForUpdates,
}

/// Snapshot of the controller's mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControllerState {
    pub dropdown_open: bool,
    /// Unread count seen by the last successful poll.
    pub last_check: Option<i64>,
}

/// Keeps the bell, panel, badge and list in step with the backend.
///
/// Everything runs on one thread. State lives in `Cell`s so the host can
/// share the controller behind an `Rc` and run several tasks at once; no
/// borrow is held across an await.
pub struct NotificationsController<A, V> {
    api: A,
    view: V,
    config: ControllerConfig,
    dropdown_open: Cell<bool>,
    last_check: Cell<Option<i64>>,
    loads_issued: Cell<u64>,
    newest_rendered: Cell<u64>,
    disposed: Cell<bool>,
}

impl<A, V> NotificationsController<A, V>
where
    A: NotificationsApi,
    V: NotificationsView,
{
    pub fn new(api: A, view: V, config: ControllerConfig) -> Self {
        Self {
            api,
            view,
            config,
            dropdown_open: Cell::new(false),
            last_check: Cell::new(None),
            loads_issued: Cell::new(0),
            newest_rendered: Cell::new(0),
            disposed: Cell::new(false),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn state(&self) -> ControllerState {
        ControllerState {
            dropdown_open: self.dropdown_open.get(),
            last_check: self.last_check.get(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.dropdown_open.get()
    }

    /// Stops the controller. Tasks still awaiting the backend leave the view
    /// untouched when they resume, and new tasks do nothing.
    pub fn dispose(&self) {
        self.disposed.set(true);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    /// Closes an open panel, opens a closed one.
    pub fn toggle(&self) -> Vec<Task> {
        if self.is_open() {
            self.close();
            Vec::new()
        } else {
            self.open().to_vec()
        }
    }

    /// Every open reloads and marks everything read.
    pub fn open(&self) -> [Task; 2] {
        if !self.is_disposed() {
            self.view.set_panel_visible(true);
        }
        self.dropdown_open.set(true);
        [Task::Load, Task::MarkAllRead]
    }

    pub fn close(&self) {
        if !self.is_disposed() {
            self.view.set_panel_visible(false);
        }
        self.dropdown_open.set(false);
    }

    /// Handles a document click. Returns whether the panel was closed.
    pub fn outside_click(&self, inside: bool) -> bool {
        if self.is_open() && !inside {
            self.close();
            true
        } else {
            false
        }
    }

    pub async fn run(&self, task: Task) {
        if self.is_disposed() {
            debug!(?task, "controller disposed, skipping task");
            return;
        }
        match task {
            Task::Load => self.load().await,
            Task::MarkAllRead => self.mark_all_read().await,
            Task::Delete(id) => self.delete(id).await,
            Task::CheckForUpdates => self.check_for_updates().await,
        }
    }

    /// Fetches the newest entries and redraws badge and list.
    pub async fn load(&self) {
        let generation = self.loads_issued.get() + 1;
        self.loads_issued.set(generation);

        match self.api.list(self.config.list_limit, 0).await {
            Ok(_) if self.is_disposed() => {}
            Ok(list) => {
                if generation < self.newest_rendered.get() {
                    debug!(
                        generation,
                        newest = self.newest_rendered.get(),
                        "dropping stale notification list"
                    );
                    return;
                }
                self.newest_rendered.set(generation);
                self.apply_badge(list.unread_count);
                self.view.render(Listing::from_entries(&list.notifications));
            }
            Err(err) => error!(error = %err, "failed to load notifications"),
        }
    }

    pub async fn mark_all_read(&self) {
        match self.api.mark_all_read().await {
            Ok(()) if self.is_disposed() => {}
            Ok(()) => {
                self.apply_badge(0);
                self.load().await;
            }
            Err(err) => error!(error = %err, "failed to mark notifications as read"),
        }
    }

    /// Removes the row only after the backend confirms the deletion.
    pub async fn delete(&self, id: i64) {
        match self.api.delete(id).await {
            Ok(true) if self.is_disposed() => {}
            Ok(true) => {
                self.view.dismiss(id, self.config.dismiss_delay).await;
                if !self.is_disposed() {
                    self.load().await;
                }
            }
            Ok(false) => debug!(id, "backend did not delete notification"),
            Err(err) => error!(id, error = %err, "failed to delete notification"),
        }
    }

    /// One poll tick.
    pub async fn check_for_updates(&self) {
        match self.api.count().await {
            Ok(_) if self.is_disposed() => {}
            Ok(count) => {
                let previous = self.last_check.replace(Some(count));
                self.apply_badge(count);
                if matches!(previous, Some(seen) if seen != count) {
                    self.load().await;
                }
            }
            Err(err) => error!(error = %err, "failed to check for notification updates"),
        }
    }

    fn apply_badge(&self, count: i64) {
        self.view
            .set_badge(&Badge::from_count(count, self.config.badge_cap));
    }
}
