use std::cell::RefCell;
use std::time::Duration;

use notify_core::{Badge, Listing, NotificationsView, RowModel, EMPTY_ICON};
use tracing::debug;

/// Prints controller updates to stdout, skipping repeats.
pub struct TerminalView {
    empty_label: String,
    last_badge: RefCell<Option<Badge>>,
    listing: RefCell<Listing>,
}

impl TerminalView {
    pub fn new(empty_label: &str) -> Self {
        Self {
            empty_label: empty_label.to_string(),
            last_badge: RefCell::new(None),
            listing: RefCell::new(Listing::Empty),
        }
    }
}

impl NotificationsView for TerminalView {
    fn set_panel_visible(&self, visible: bool) {
        debug!(visible, "panel visibility changed");
    }

    fn set_badge(&self, badge: &Badge) {
        let mut last = self.last_badge.borrow_mut();
        if last.as_ref() == Some(badge) {
            return;
        }
        println!("{}", format_badge(badge));
        *last = Some(badge.clone());
    }

    fn render(&self, listing: Listing) {
        if *self.listing.borrow() == listing {
            return;
        }
        for line in format_listing(&listing, &self.empty_label) {
            println!("{line}");
        }
        *self.listing.borrow_mut() = listing;
    }

    async fn dismiss(&self, id: i64, delay: Duration) {
        tokio::time::sleep(delay).await;
        let remaining = self.listing.borrow().without(id);
        *self.listing.borrow_mut() = remaining;
        println!("removed #{id}");
    }
}

pub fn format_badge(badge: &Badge) -> String {
    match badge {
        Badge::Hidden => "🔔 no unread notifications".to_string(),
        Badge::Visible(text) => format!("🔔 {text} unread"),
    }
}

pub fn format_row(row: &RowModel) -> String {
    let marker = if row.unread { "●" } else { " " };
    format!(
        "{marker} {icon} #{id} {title}: {message} ({time})",
        icon = row.icon,
        id = row.id,
        title = row.title,
        message = row.message,
        time = row.time,
    )
}

pub fn format_listing(listing: &Listing, empty_label: &str) -> Vec<String> {
    match listing {
        Listing::Empty => vec![format!("{EMPTY_ICON} {empty_label}")],
        Listing::Rows(rows) => rows.iter().map(format_row).collect(),
    }
}
