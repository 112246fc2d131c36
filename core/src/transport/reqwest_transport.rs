//! Async transport backed by `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::AsyncTransport;

fn transport_error(err: reqwest::Error) -> ApiError {
    ApiError::Transport(Box::new(err))
}

/// [`AsyncTransport`] over a `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing client and its connection pool.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport_error)?;
        Ok(Self { client })
    }

    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body_bytes()? {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await.map_err(transport_error)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[async_trait]
impl AsyncTransport for ReqwestTransport {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.execute(request).await
    }

    async fn post(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.execute(request).await
    }

    async fn put(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.execute(request).await
    }

    async fn patch(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.execute(request).await
    }

    async fn delete(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.execute(request).await
    }
}
