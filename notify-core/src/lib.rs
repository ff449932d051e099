//! Core model and presentation rules for the notification bell.

mod controller;
mod list_state;

pub use controller::{
    ControllerState, NotificationsApi, NotificationsController, NotificationsView, Task,
};
pub use list_state::ListState;

use std::time::Duration;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Icon shown next to the empty-list label.
pub const EMPTY_ICON: &str = "📭";

/// Element ids the controller attaches to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DomAnchors {
    /// Bell button that toggles the panel.
    pub bell: String,
    /// Dropdown panel.
    pub panel: String,
    /// Unread counter overlay.
    pub badge: String,
    /// Container the list is rendered into.
    pub list: String,
}

impl Default for DomAnchors {
    fn default() -> Self {
        Self {
            bell: "notifications-bell".to_string(),
            panel: "notifications-dropdown-menu".to_string(),
            badge: "notifications-badge".to_string(),
            list: "notifications-list".to_string(),
        }
    }
}

/// Tunables for the controller and the views built on it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControllerConfig {
    /// Period of the unread-count poll.
    pub poll_interval: Duration,
    /// How many entries a load asks for.
    pub list_limit: u32,
    /// Time the removal animation runs before the row is dropped.
    pub dismiss_delay: Duration,
    /// Counts above this are shown as `"{cap}+"`.
    pub badge_cap: i64,
    /// Prefix of every backend endpoint.
    pub api_base: String,
    /// Page a row click navigates to.
    pub notifications_page: String,
    pub anchors: DomAnchors,
    /// Class that makes the panel visible.
    pub visible_class: String,
    /// Id of the injected `<style>` element.
    pub style_marker_id: String,
    pub empty_label: String,
    pub delete_label: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(30),
            list_limit: 10,
            dismiss_delay: Duration::from_millis(300),
            badge_cap: 99,
            api_base: "/api/notifications".to_string(),
            notifications_page: "/notifications".to_string(),
            anchors: DomAnchors::default(),
            visible_class: "show".to_string(),
            style_marker_id: "notifications-styles".to_string(),
            empty_label: "No new notifications".to_string(),
            delete_label: "Delete".to_string(),
        }
    }
}

impl ControllerConfig {
    /// Rejects settings the controller cannot run with.
    pub fn validate(&self) -> Result<(), NotifyError> {
        if self.poll_interval.is_zero() {
            return Err(NotifyError::Config(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        if self.list_limit == 0 {
            return Err(NotifyError::Config(
                "list limit must be greater than zero".to_string(),
            ));
        }
        if self.badge_cap <= 0 {
            return Err(NotifyError::Config(
                "badge cap must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Category of a notification, as sent in the `type` field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
    /// Also catches every value the backend may add later.
    #[default]
    #[serde(other)]
    Info,
}

impl NotificationKind {
    pub fn icon(self) -> &'static str {
        match self {
            NotificationKind::Success => "✅",
            NotificationKind::Warning => "⚠️",
            NotificationKind::Error => "❌",
            NotificationKind::Info => "ℹ️",
        }
    }
}

/// One notification record as delivered by the backend.
///
/// Only `id` is strict. Any other field that is missing, `null` or of the
/// wrong type falls back to its default instead of failing the whole list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationEntry {
    pub id: i64,
    #[serde(rename = "type", default, deserialize_with = "or_default")]
    pub kind: NotificationKind,
    #[serde(default, deserialize_with = "or_default")]
    pub title: String,
    #[serde(default, deserialize_with = "or_default")]
    pub message: String,
    /// Already formatted by the backend.
    #[serde(default, deserialize_with = "or_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "or_default")]
    pub is_read: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Value(T),
    Other(IgnoredAny),
}

fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(match Lenient::<T>::deserialize(deserializer)? {
        Lenient::Value(value) => value,
        Lenient::Other(_) => T::default(),
    })
}

/// Result of a list request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NotificationList {
    pub unread_count: i64,
    pub notifications: Vec<NotificationEntry>,
}

/// Display state of the unread counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Badge {
    Hidden,
    Visible(String),
}

impl Badge {
    /// Counts of zero or below hide the badge; counts above `cap` collapse to `"{cap}+"`.
    pub fn from_count(count: i64, cap: i64) -> Self {
        if count <= 0 {
            Badge::Hidden
        } else if count > cap {
            Badge::Visible(format!("{cap}+"))
        } else {
            Badge::Visible(count.to_string())
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Badge::Hidden => None,
            Badge::Visible(text) => Some(text),
        }
    }
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowModel {
    pub id: i64,
    pub icon: &'static str,
    pub title: String,
    pub message: String,
    pub time: String,
    pub unread: bool,
}

impl From<&NotificationEntry> for RowModel {
    fn from(entry: &NotificationEntry) -> Self {
        Self {
            id: entry.id,
            icon: entry.kind.icon(),
            title: entry.title.clone(),
            message: entry.message.clone(),
            time: entry.created_at.clone(),
            unread: !entry.is_read,
        }
    }
}

/// Presentation model of the notification list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Listing {
    #[default]
    Empty,
    Rows(Vec<RowModel>),
}

impl Listing {
    /// Keeps the backend's order.
    pub fn from_entries(entries: &[NotificationEntry]) -> Self {
        if entries.is_empty() {
            Listing::Empty
        } else {
            Listing::Rows(entries.iter().map(RowModel::from).collect())
        }
    }

    pub fn rows(&self) -> &[RowModel] {
        match self {
            Listing::Empty => &[],
            Listing::Rows(rows) => rows,
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.rows().iter().any(|row| row.id == id)
    }

    /// Same listing with the row for `id` dropped.
    pub fn without(&self, id: i64) -> Self {
        let rows: Vec<RowModel> = self
            .rows()
            .iter()
            .filter(|row| row.id != id)
            .cloned()
            .collect();
        if rows.is_empty() {
            Listing::Empty
        } else {
            Listing::Rows(rows)
        }
    }
}

/// Failures surfaced by API clients and views.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("DOM error: {0}")]
    Dom(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}
