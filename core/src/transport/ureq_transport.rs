//! Blocking transport backed by `ureq`.

use std::time::Duration;

use ureq::http::Response;
use ureq::typestate::{WithBody, WithoutBody};
use ureq::{Agent, Body, RequestBuilder};

use crate::error::ApiError;
use crate::http::{Headers, HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;

/// [`Transport`] over a shared `ureq` agent.
///
/// Error statuses come back as responses so the executor decides what
/// counts as a failure.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::with_timeout(None)
    }

    /// Limit each call to `timeout` in total.
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }

    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let body = request.body_bytes()?;
        let url = request.url.as_str();
        let result = match request.method {
            HttpMethod::Get => send_without_body(self.agent.get(url), &request.headers, body),
            HttpMethod::Delete => send_without_body(self.agent.delete(url), &request.headers, body),
            HttpMethod::Post => send_with_body(self.agent.post(url), &request.headers, body),
            HttpMethod::Put => send_with_body(self.agent.put(url), &request.headers, body),
            HttpMethod::Patch => send_with_body(self.agent.patch(url), &request.headers, body),
        };
        let mut response = result.map_err(|e| ApiError::Transport(Box::new(e)))?;

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
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(Box::new(e)))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn send_without_body(
    builder: RequestBuilder<WithoutBody>,
    headers: &Headers,
    body: Option<Vec<u8>>,
) -> Result<Response<Body>, ureq::Error> {
    let builder = headers
        .iter()
        .fold(builder, |b, (name, value)| b.header(name.as_str(), value.as_str()));
    match body {
        Some(bytes) => builder.force_send_body().send(&bytes[..]),
        None => builder.call(),
    }
}

fn send_with_body(
    builder: RequestBuilder<WithBody>,
    headers: &Headers,
    body: Option<Vec<u8>>,
) -> Result<Response<Body>, ureq::Error> {
    let builder = headers
        .iter()
        .fold(builder, |b, (name, value)| b.header(name.as_str(), value.as_str()));
    match body {
        Some(bytes) => builder.send(&bytes[..]),
        None => builder.send_empty(),
    }
}

impl Transport for UreqTransport {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.execute(request)
    }

    fn post(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.execute(request)
    }

    fn put(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.execute(request)
    }

    fn patch(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.execute(request)
    }

    fn delete(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.execute(request)
    }
}
