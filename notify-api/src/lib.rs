//! Wire format of the notifications backend: endpoint paths and response bodies.

use notify_core::{NotificationList, NotifyError};
use serde::{Deserialize, Serialize};

/// Paths of every backend endpoint, relative to a common prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// `GET`. The offset is left out when zero, as the page script never sends it.
    pub fn list(&self, limit: u32, offset: u32) -> String {
        if offset == 0 {
            format!("{}?limit={limit}", self.base)
        } else {
            format!("{}?limit={limit}&offset={offset}", self.base)
        }
    }

    /// `GET`.
    pub fn count(&self) -> String {
        format!("{}/count", self.base)
    }

    /// `POST`.
    pub fn read_all(&self) -> String {
        format!("{}/read-all", self.base)
    }

    /// `POST`.
    pub fn read_one(&self, id: i64) -> String {
        format!("{}/{id}/read", self.base)
    }

    /// `DELETE`.
    pub fn delete_one(&self, id: i64) -> String {
        format!("{}/{id}", self.base)
    }

    /// `DELETE`.
    pub fn delete_all(&self) -> String {
        format!("{}/delete-all", self.base)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new("/api/notifications")
    }
}

/// Body of the count endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountResponse {
    pub count: i64,
}

/// Body of the endpoints that report whether they did anything.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SuccessResponse {
    /// Missing counts as `false`.
    #[serde(default)]
    pub success: bool,
}

pub fn decode_list(body: &str) -> Result<NotificationList, NotifyError> {
    decode(body, "notification list")
}

pub fn decode_count(body: &str) -> Result<i64, NotifyError> {
    decode::<CountResponse>(body, "notification count").map(|resp| resp.count)
}

pub fn decode_success(body: &str) -> Result<bool, NotifyError> {
    decode::<SuccessResponse>(body, "success flag").map(|resp| resp.success)
}

/// Same as [`decode_list`] for an already parsed JSON value.
pub fn list_from_value(value: serde_json::Value) -> Result<NotificationList, NotifyError> {
    serde_json::from_value(value)
        .map_err(|err| NotifyError::Decode(format!("notification list: {err}")))
}

fn decode<T>(body: &str, what: &str) -> Result<T, NotifyError>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_str(body).map_err(|err| NotifyError::Decode(format!("{what}: {err}")))
}
