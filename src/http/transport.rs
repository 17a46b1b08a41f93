use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::error::HttpError;

/// Status and body text of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub text: String,
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one request. `json_body`, when present, is serialized as the
    /// request payload with a JSON content type.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is invalid, the request cannot be
    /// delivered, or the response body cannot be read. Non-2xx statuses are
    /// not errors.
    async fn request(
        &self,
        method: &Method,
        url: &str,
        json_body: Option<&Value>,
    ) -> Result<TransportResponse, HttpError>;
}
