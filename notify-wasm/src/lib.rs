//! Browser bridge: fetch-backed API client, JS configuration and diagnostics.

#[cfg(target_arch = "wasm32")]
mod fetch;

#[cfg(target_arch = "wasm32")]
pub use fetch::FetchApi;

use std::time::Duration;

use notify_core::{Badge, ControllerConfig, Listing, NotifyError};
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

/// Partial configuration passed from the page; absent fields keep their defaults.
#[derive(Debug, Default, Deserialize)]
pub struct JsNotifyConfig {
    #[serde(default)]
    poll_interval_ms: Option<u32>,
    #[serde(default)]
    list_limit: Option<u32>,
    #[serde(default)]
    dismiss_delay_ms: Option<u32>,
    #[serde(default)]
    badge_cap: Option<i64>,
    #[serde(default)]
    api_base: Option<String>,
    #[serde(default)]
    notifications_page: Option<String>,
    #[serde(default)]
    bell_id: Option<String>,
    #[serde(default)]
    panel_id: Option<String>,
    #[serde(default)]
    badge_id: Option<String>,
    #[serde(default)]
    list_id: Option<String>,
    #[serde(default)]
    visible_class: Option<String>,
    #[serde(default)]
    style_marker_id: Option<String>,
    #[serde(default)]
    empty_label: Option<String>,
    #[serde(default)]
    delete_label: Option<String>,
}

impl From<JsNotifyConfig> for ControllerConfig {
    fn from(cfg: JsNotifyConfig) -> Self {
        let mut base = ControllerConfig::default();
        if let Some(ms) = cfg.poll_interval_ms {
            base.poll_interval = Duration::from_millis(u64::from(ms));
        }
        if let Some(limit) = cfg.list_limit {
            base.list_limit = limit;
        }
        if let Some(ms) = cfg.dismiss_delay_ms {
            base.dismiss_delay = Duration::from_millis(u64::from(ms));
        }
        if let Some(cap) = cfg.badge_cap {
            base.badge_cap = cap;
        }
        if let Some(api_base) = cfg.api_base {
            base.api_base = api_base;
        }
        if let Some(page) = cfg.notifications_page {
            base.notifications_page = page;
        }
        if let Some(id) = cfg.bell_id {
            base.anchors.bell = id;
        }
        if let Some(id) = cfg.panel_id {
            base.anchors.panel = id;
        }
        if let Some(id) = cfg.badge_id {
            base.anchors.badge = id;
        }
        if let Some(id) = cfg.list_id {
            base.anchors.list = id;
        }
        if let Some(class) = cfg.visible_class {
            base.visible_class = class;
        }
        if let Some(id) = cfg.style_marker_id {
            base.style_marker_id = id;
        }
        if let Some(label) = cfg.empty_label {
            base.empty_label = label;
        }
        if let Some(label) = cfg.delete_label {
            base.delete_label = label;
        }
        base
    }
}

/// Builds a validated config from an optional JS object.
pub fn config_from_js(config: Option<JsValue>) -> Result<ControllerConfig, JsValue> {
    let cfg = match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
            let cfg: JsNotifyConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Cannot read config: {err}")))?;
            ControllerConfig::from(cfg)
        }
        _ => ControllerConfig::default(),
    };
    cfg.validate()
        .map_err(|err| JsValue::from_str(&format_notify_error(err)))?;
    Ok(cfg)
}

/// Installs the panic hook and routes `tracing` events to the browser console.
pub fn init_diagnostics() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        // Already installed when a second bundle on the page got here first.
        let _ = tracing_wasm::try_set_as_global_default();
    }
}

/// Badge text for `count`, or `undefined` when the badge should be hidden.
#[wasm_bindgen]
pub fn badge_text(count: f64, cap: Option<u32>) -> Option<String> {
    let cap = cap.map(i64::from).unwrap_or(99);
    badge_for(count, cap).text().map(str::to_string)
}

/// Row view of a list response, in the shape the dropdown renders.
#[wasm_bindgen]
pub fn notification_rows(list: JsValue) -> Result<JsValue, JsValue> {
    let value = from_value::<serde_json::Value>(list)
        .map_err(|err| JsValue::from_str(&format!("Cannot read list: {err}")))?;
    let list = notify_api::list_from_value(value)
        .map_err(|err| JsValue::from_str(&format_notify_error(err)))?;

    let rows = js_rows(&Listing::from_entries(&list.notifications));
    to_value(&rows).map_err(|err| JsValue::from_str(&format!("Cannot serialize rows: {err}")))
}

#[derive(Debug, Serialize, PartialEq)]
struct JsRow {
    id: i64,
    icon: &'static str,
    title: String,
    message: String,
    time: String,
    unread: bool,
}

fn js_rows(listing: &Listing) -> Vec<JsRow> {
    listing
        .rows()
        .iter()
        .map(|row| JsRow {
            id: row.id,
            icon: row.icon,
            title: row.title.clone(),
            message: row.message.clone(),
            time: row.time.clone(),
            unread: row.unread,
        })
        .collect()
}

fn badge_for(count: f64, cap: i64) -> Badge {
    // NaN compares false against everything, so it hides the badge like zero.
    if count.is_nan() {
        return Badge::Hidden;
    }
    Badge::from_count(count.trunc() as i64, cap)
}

pub fn format_notify_error(err: NotifyError) -> String {
    format!("Notifications error: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_js_config_keeps_defaults() {
        let cfg: JsNotifyConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(ControllerConfig::from(cfg), ControllerConfig::default());
    }

    #[test]
    fn js_config_overrides_selected_fields() {
        let cfg: JsNotifyConfig = serde_json::from_str(
            r#"{"poll_interval_ms": 5000, "list_limit": 20, "bell_id": "bell", "api_base": "/v2/notifications"}"#,
        )
        .unwrap();
        let config = ControllerConfig::from(cfg);

        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.list_limit, 20);
        assert_eq!(config.anchors.bell, "bell");
        assert_eq!(config.anchors.panel, "notifications-dropdown-menu");
        assert_eq!(config.api_base, "/v2/notifications");
        assert_eq!(config.dismiss_delay, Duration::from_millis(300));
    }

    #[test]
    fn zero_limit_fails_validation() {
        let cfg: JsNotifyConfig = serde_json::from_str(r#"{"list_limit": 0}"#).unwrap();
        assert!(ControllerConfig::from(cfg).validate().is_err());
    }

    #[test]
    fn badge_for_handles_non_integral_counts() {
        assert_eq!(badge_for(f64::NAN, 99), Badge::Hidden);
        assert_eq!(badge_for(-1.0, 99), Badge::Hidden);
        assert_eq!(badge_for(3.0, 99).text(), Some("3"));
        assert_eq!(badge_for(250.0, 99).text(), Some("99+"));
    }

    #[test]
    fn js_rows_mirror_listing() {
        let list = notify_api::decode_list(
            r#"{"unread_count": 1, "notifications": [{"id": 5, "type": "error", "title": "Payment failed", "message": "Try again", "created_at": "02.10.2025 10:00", "is_read": false}]}"#,
        )
        .unwrap();
        let rows = js_rows(&Listing::from_entries(&list.notifications));
        assert_eq!(
            rows,
            vec![JsRow {
                id: 5,
                icon: "❌",
                title: "Payment failed".to_string(),
                message: "Try again".to_string(),
                time: "02.10.2025 10:00".to_string(),
                unread: true,
            }]
        );
    }
}
