//! REST client for the Leafpress storefront backend.
//!
//! The backend exposes a JSON API under `/api`; this module provides a
//! typed client over it. All JSON requests carry a JSON content type;
//! multipart image uploads omit it and let the multipart encoder set its
//! own boundary header. Non-2xx responses are turned into [`ApiError::Api`]
//! with the server's `message` field when the error body parses, and a
//! generic fallback when it doesn't.

mod customers;
mod error;
mod gateway;
mod orders;
mod products;
mod stats;
mod types;

pub use error::ApiError;
pub use gateway::ProductGateway;
pub use orders::{OrderFilter, OrderSort};
pub use types::{BulkDiscountOutcome, UploadFile, UploadOutcome};

use std::sync::Arc;

use error::{UNKNOWN_ERROR_MESSAGE, extract_error_message};

use crate::config::AdminConfig;

/// Typed client for the storefront REST backend.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

#[derive(Debug)]
struct ApiClientInner {
    client: reqwest::Client,
    /// Base URL including the `/api` prefix, without a trailing slash.
    api_root: String,
}

impl ApiClient {
    /// Create a new client for the configured backend.
    #[must_use]
    pub fn new(config: &AdminConfig) -> Self {
        let api_root = format!(
            "{}/api",
            config.api_base_url.as_str().trim_end_matches('/')
        );

        Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                api_root,
            }),
        }
    }

    /// The resolved API root (scheme, host, `/api`).
    #[must_use]
    pub fn api_root(&self) -> &str {
        &self.inner.api_root
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.api_root)
    }

    /// Execute a GET request.
    pub(crate) async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, ApiError> {
        let response = self.inner.client.get(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    /// Execute a POST request with a JSON body.
    pub(crate) async fn post<T: serde::de::DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.inner.client.post(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Execute a PUT request with a JSON body.
    pub(crate) async fn put<T: serde::de::DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.inner.client.put(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Execute a PATCH request with a JSON body.
    pub(crate) async fn patch<T: serde::de::DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.inner.client.patch(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Execute a DELETE request.
    pub(crate) async fn delete<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, ApiError> {
        let response = self.inner.client.delete(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    /// Execute a multipart POST request.
    ///
    /// No JSON content type here: reqwest sets the multipart boundary header.
    pub(crate) async fn post_multipart<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        let response = self
            .inner
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Handle API response and parse JSON.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| ApiError::Parse(format!("Failed to parse response: {e}")));
        }

        Err(Self::parse_error(response).await)
    }

    /// Parse a non-2xx response into an [`ApiError`].
    async fn parse_error(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message =
            extract_error_message(&body).unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string());

        if status == 404 {
            return ApiError::NotFound(message);
        }

        ApiError::Api { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(base: &str) -> ApiClient {
        let config = AdminConfig {
            api_base_url: base.parse().expect("valid url"),
            max_image_bytes: 1024,
        };
        ApiClient::new(&config)
    }

    #[test]
    fn test_api_root_strips_trailing_slash() {
        // Url normalises "http://host:5000" to "http://host:5000/"
        let client = client_for("http://localhost:5000");
        assert_eq!(client.api_root(), "http://localhost:5000/api");
    }

    #[test]
    fn test_url_joins_paths() {
        let client = client_for("https://api.leafpress.in/");
        assert_eq!(
            client.url("/product/list"),
            "https://api.leafpress.in/api/product/list"
        );
    }
}
