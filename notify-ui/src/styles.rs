#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

/// Delete-button affordance and the row removal transition.
pub const DEFAULT_STYLES: &str = r#"
.notification-item {
  position: relative;
  cursor: pointer;
  transition: opacity 0.3s ease, transform 0.3s ease;
}

.notification-item.is-dismissing {
  opacity: 0;
  transform: translateX(100%);
}

.notification-item-delete {
  position: absolute;
  right: 12px;
  top: 50%;
  transform: translateY(-50%);
  background: #e74c3c;
  color: white;
  border: none;
  border-radius: 50%;
  width: 24px;
  height: 24px;
  font-size: 14px;
  cursor: pointer;
  opacity: 0;
  transition: all 0.2s;
  display: flex;
  align-items: center;
  justify-content: center;
  z-index: 10;
}

.notification-item:hover .notification-item-delete {
  opacity: 1;
}

.notification-item-delete:hover {
  background: #c0392b;
  transform: translateY(-50%) scale(1.1);
}
"#;

/// Appends the style block once; an element with `marker_id` means it is already there.
pub fn ensure_styles(document: &Document, marker_id: &str) -> Result<(), JsValue> {
    if document.get_element_by_id(marker_id).is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document has no <head>"))?;

    let style_el = document.create_element("style")?;
    style_el.set_id(marker_id);
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el.dyn_into::<Node>()?)?;

    Ok(())
}
