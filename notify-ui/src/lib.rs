//! Notification bell for the browser: bell toggle, badge, dropdown list and polling.

#[cfg(target_arch = "wasm32")]
mod list;
#[cfg(target_arch = "wasm32")]
mod mount;
#[cfg(target_arch = "wasm32")]
mod styles;
#[cfg(target_arch = "wasm32")]
mod view;

#[cfg(target_arch = "wasm32")]
pub use mount::{mount_notifications, NotificationsHandle};

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_notifications(_: Option<wasm_bindgen::JsValue>) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "notify-ui only supports the wasm32 target",
    ))
}
