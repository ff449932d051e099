use std::time::Duration;

use anyhow::Context;
use notify_api::{decode_count, decode_list, decode_success, Endpoints};
use notify_core::{NotificationList, NotificationsApi, NotifyError};
use reqwest::header::{CONTENT_TYPE, COOKIE};
use reqwest::{Client, Method, RequestBuilder};
use tracing::debug;

/// [`NotificationsApi`] over HTTP for use outside the browser.
pub struct ReqwestApi {
    http: Client,
    base_url: String,
    endpoints: Endpoints,
    cookie: Option<String>,
}

impl ReqwestApi {
    pub fn new(
        base_url: &str,
        api_base: &str,
        cookie: Option<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Cannot build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            endpoints: Endpoints::new(api_base),
            cookie,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let request = self.http.request(method, url);
        match &self.cookie {
            Some(cookie) => request.header(COOKIE, cookie),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<String, NotifyError> {
        let response = request.send().await.map_err(transport)?;
        debug!(url = %response.url(), status = %response.status(), "notifications response");
        response.text().await.map_err(transport)
    }
}

fn transport(err: reqwest::Error) -> NotifyError {
    NotifyError::Transport(err.to_string())
}

impl NotificationsApi for ReqwestApi {
    async fn list(&self, limit: u32, offset: u32) -> Result<NotificationList, NotifyError> {
        let body = self
            .send(self.request(Method::GET, &self.endpoints.list(limit, offset)))
            .await?;
        decode_list(&body)
    }

    async fn count(&self) -> Result<i64, NotifyError> {
        let body = self
            .send(self.request(Method::GET, &self.endpoints.count()))
            .await?;
        decode_count(&body)
    }

    async fn mark_all_read(&self) -> Result<(), NotifyError> {
        let request = self
            .request(Method::POST, &self.endpoints.read_all())
            .header(CONTENT_TYPE, "application/json");
        self.send(request).await.map(|_| ())
    }

    async fn mark_read(&self, id: i64) -> Result<bool, NotifyError> {
        let request = self
            .request(Method::POST, &self.endpoints.read_one(id))
            .header(CONTENT_TYPE, "application/json");
        decode_success(&self.send(request).await?)
    }

    async fn delete(&self, id: i64) -> Result<bool, NotifyError> {
        let request = self
            .request(Method::DELETE, &self.endpoints.delete_one(id))
            .header(CONTENT_TYPE, "application/json");
        decode_success(&self.send(request).await?)
    }

    async fn delete_all(&self) -> Result<bool, NotifyError> {
        let request = self
            .request(Method::DELETE, &self.endpoints.delete_all())
            .header(CONTENT_TYPE, "application/json");
        decode_success(&self.send(request).await?)
    }
}
