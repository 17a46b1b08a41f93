use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use serde_json::Value;
use tracing::debug;

use crate::args::DEFAULT_USER_AGENT;
use crate::error::{AppError, AppResult, HttpError};

use super::transport::{Transport, TransportResponse};

#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Whole-request timeout; `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns an error when the TLS backend cannot be initialised.
    pub fn new(options: &ClientOptions) -> AppResult<Self> {
        let mut builder = Client::builder().user_agent(DEFAULT_USER_AGENT);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn request(
        &self,
        method: &Method,
        url: &str,
        json_body: Option<&Value>,
    ) -> Result<TransportResponse, HttpError> {
        let parsed = Url::parse(url).map_err(|err| HttpError::InvalidUrl {
            url: url.to_owned(),
            source: err,
        })?;

        let mut request_builder = self.client.request(method.clone(), parsed);
        if let Some(body) = json_body {
            request_builder = request_builder.json(body);
        }

        let response = request_builder
            .send()
            .await
            .map_err(|err| HttpError::RequestFailed {
                url: url.to_owned(),
                source: err,
            })?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|err| HttpError::ReadBodyFailed {
                url: url.to_owned(),
                source: err,
            })?;
        debug!("{} {} -> {} ({} bytes)", method, url, status, text.len());

        Ok(TransportResponse { status, text })
    }
}
