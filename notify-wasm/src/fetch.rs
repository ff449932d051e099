use gloo_net::http::{Request, Response};
use notify_api::{decode_count, decode_list, decode_success, Endpoints};
use notify_core::{ControllerConfig, NotificationList, NotificationsApi, NotifyError};
use tracing::debug;

/// [`NotificationsApi`] over the browser's `fetch`, sending the page's own cookies.
///
/// Status codes are not inspected: the backend always answers with JSON and
/// anything else fails to decode.
#[derive(Debug, Clone)]
pub struct FetchApi {
    endpoints: Endpoints,
}

impl FetchApi {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            endpoints: Endpoints::new(&config.api_base),
        }
    }
}

fn transport(err: gloo_net::Error) -> NotifyError {
    NotifyError::Transport(err.to_string())
}

async fn read_body(response: Response) -> Result<String, NotifyError> {
    debug!(url = %response.url(), status = response.status(), "notifications response");
    response.text().await.map_err(transport)
}

impl NotificationsApi for FetchApi {
    async fn list(&self, limit: u32, offset: u32) -> Result<NotificationList, NotifyError> {
        let response = Request::get(&self.endpoints.list(limit, offset))
            .send()
            .await
            .map_err(transport)?;
        decode_list(&read_body(response).await?)
    }

    async fn count(&self) -> Result<i64, NotifyError> {
        let response = Request::get(&self.endpoints.count())
            .send()
            .await
            .map_err(transport)?;
        decode_count(&read_body(response).await?)
    }

    async fn mark_all_read(&self) -> Result<(), NotifyError> {
        Request::post(&self.endpoints.read_all())
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(transport)?;
        Ok(())
    }

    async fn mark_read(&self, id: i64) -> Result<bool, NotifyError> {
        let response = Request::post(&self.endpoints.read_one(id))
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(transport)?;
        decode_success(&read_body(response).await?)
    }

    async fn delete(&self, id: i64) -> Result<bool, NotifyError> {
        let response = Request::delete(&self.endpoints.delete_one(id))
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(transport)?;
        decode_success(&read_body(response).await?)
    }

    async fn delete_all(&self) -> Result<bool, NotifyError> {
        let response = Request::delete(&self.endpoints.delete_all())
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(transport)?;
        decode_success(&read_body(response).await?)
    }
}
