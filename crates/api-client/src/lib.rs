//! HTTP client port for API interactions.
//!
//! Requests are described relative to a base endpoint; the client joins the
//! two and returns an [`ApiResponse`] whose JSON body can be queried by field
//! path (`data.items[0].id`).

use async_trait::async_trait;

pub mod error;
pub mod model;
mod reqwest_client;
mod stub;

pub use error::ApiError;
pub use model::{ApiRequest, ApiResponse, Method};
pub use reqwest_client::ReqwestApiClient;
pub use stub::StubApiClient;

#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn send(&self, base_url: &str, request: &ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Join `path` onto `base_url`, keeping any path prefix the base already has.
pub fn resolve_url(base_url: &str, path: &str) -> Result<url::Url, ApiError> {
    if let Ok(absolute) = url::Url::parse(path) {
        return Ok(absolute);
    }
    let mut base = base_url.to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    let base = url::Url::parse(&base).map_err(|err| ApiError::InvalidUrl {
        url: base_url.to_string(),
        reason: err.to_string(),
    })?;
    base.join(path.trim_start_matches('/'))
        .map_err(|err| ApiError::InvalidUrl {
            url: path.to_string(),
            reason: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_paths_under_base_prefix() {
        let url = resolve_url("https://jsonplaceholder.typicode.com", "/posts/1").unwrap();
        assert_eq!(url.as_str(), "https://jsonplaceholder.typicode.com/posts/1");

        let url = resolve_url("http://localhost:8080/api/v1", "users").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/v1/users");
    }

    #[test]
    fn absolute_paths_win() {
        let url = resolve_url("http://localhost", "https://example.com/x").unwrap();
        assert_eq!(url.as_str(), "https://example.com/x");
    }

    #[test]
    fn rejects_unparsable_base() {
        assert!(matches!(
            resolve_url("not a url", "/posts"),
            Err(ApiError::InvalidUrl { .. })
        ));
    }
}
