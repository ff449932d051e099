#![cfg(target_arch = "wasm32")]

use notify_core::{Listing, RowModel, EMPTY_ICON};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct NotificationListProps {
    pub listing: Listing,
    /// Row currently playing its removal transition.
    #[prop_or_default]
    pub dismissing: Option<i64>,
    pub on_delete: Callback<i64>,
    pub on_open_page: Callback<()>,
    pub empty_label: AttrValue,
    pub delete_label: AttrValue,
}

/// Rows of the dropdown. Text fields go through yew text nodes, never raw markup.
#[function_component(NotificationList)]
pub fn notification_list(props: &NotificationListProps) -> Html {
    match &props.listing {
        Listing::Empty => html! {
            <div class="notifications-empty">
                <div class="notifications-empty-icon">{ EMPTY_ICON }</div>
                <p>{ props.empty_label.clone() }</p>
            </div>
        },
        Listing::Rows(rows) => html! {
            for rows.iter().map(|row| render_row(row, props))
        },
    }
}

fn render_row(row: &RowModel, props: &NotificationListProps) -> Html {
    let onclick = {
        let on_open_page = props.on_open_page.clone();
        Callback::from(move |_: MouseEvent| on_open_page.emit(()))
    };

    let on_delete = {
        let on_delete = props.on_delete.clone();
        let id = row.id;
        Callback::from(move |event: MouseEvent| {
            event.stop_propagation();
            on_delete.emit(id);
        })
    };

    let dismissing = props.dismissing == Some(row.id);

    html! {
        <div
            key={row.id.to_string()}
            class={classes!(
                "notification-item",
                row.unread.then_some("unread"),
                dismissing.then_some("is-dismissing")
            )}
            data-id={row.id.to_string()}
            onclick={onclick}
        >
            <div class="notification-item-icon">{ row.icon }</div>
            <div class="notification-item-content">
                <div class="notification-item-title">{ row.title.clone() }</div>
                <div class="notification-item-message">{ row.message.clone() }</div>
                <div class="notification-item-time">{ row.time.clone() }</div>
            </div>
            <button
                type="button"
                class="notification-item-delete"
                title={props.delete_label.clone()}
                onclick={on_delete}
            >
                {"✕"}
            </button>
        </div>
    }
}
