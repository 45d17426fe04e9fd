use crate::error::ApiError;
use crate::model::{ApiRequest, ApiResponse, Method};
use crate::ApiClient;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::time::Duration;

/// Canned-response client. Unrouted requests answer `404` with a null body.
#[derive(Default)]
pub struct StubApiClient {
    routes: Vec<(Method, String, ApiResponse)>,
    delay: Option<Duration>,
    received: Mutex<Vec<ApiRequest>>,
}

impl StubApiClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, method: Method, path: impl Into<String>, response: ApiResponse) -> Self {
        self.routes.push((method, path.into(), response));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn received(&self) -> Vec<ApiRequest> {
        self.received.lock().clone()
    }
}

#[async_trait]
impl ApiClient for StubApiClient {
    async fn send(&self, _base_url: &str, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.received.lock().push(request.clone());
        let response = self
            .routes
            .iter()
            .find(|(method, path, _)| *method == request.method && *path == request.path)
            .map(|(_, _, response)| response.clone())
            .unwrap_or_else(|| ApiResponse::new(404, Value::Null));
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn routes_by_method_and_path() {
        let stub = StubApiClient::new().route(
            Method::Get,
            "/posts/1",
            ApiResponse::new(200, json!({ "id": 1 })),
        );

        let hit = stub
            .send("http://unused", &ApiRequest::new(Method::Get, "/posts/1"))
            .await
            .unwrap();
        assert_eq!(hit.status, 200);

        let miss = stub
            .send("http://unused", &ApiRequest::new(Method::Delete, "/posts/1"))
            .await
            .unwrap();
        assert_eq!(miss.status, 404);
        assert_eq!(stub.received().len(), 2);
    }
}
