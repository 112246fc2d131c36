//! Transport capability contract.
//!
//! # Design
//! A transport exposes one method per HTTP verb. [`send`] and [`send_async`]
//! map an [`HttpMethod`] onto those methods with a fixed `match`, so the
//! verb is never looked up by name. Verbs a transport leaves unimplemented
//! fail with [`ApiError::UnsupportedMethod`]; transports that implement only
//! a subset should say so through `supports` so the failure surfaces while
//! the call is being prepared rather than when it is sent.
//!
//! The client holds a single [`Driver`], either blocking or async. Swapping
//! it between calls is how one client serves both execution modes.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

#[cfg(feature = "reqwest")]
mod reqwest_transport;
#[cfg(feature = "ureq")]
mod ureq_transport;

#[cfg(feature = "reqwest")]
pub use reqwest_transport::ReqwestTransport;
#[cfg(feature = "ureq")]
pub use ureq_transport::UreqTransport;

fn unsupported(method: HttpMethod) -> Result<HttpResponse, ApiError> {
    Err(ApiError::UnsupportedMethod { method })
}

/// Blocking HTTP transport.
pub trait Transport: Send + Sync {
    fn supports(&self, method: HttpMethod) -> bool {
        let _ = method;
        true
    }

    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let _ = request;
        unsupported(HttpMethod::Get)
    }

    fn post(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let _ = request;
        unsupported(HttpMethod::Post)
    }

    fn put(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let _ = request;
        unsupported(HttpMethod::Put)
    }

    fn patch(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let _ = request;
        unsupported(HttpMethod::Patch)
    }

    fn delete(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let _ = request;
        unsupported(HttpMethod::Delete)
    }
}

/// Async HTTP transport. Same contract as [`Transport`].
#[async_trait]
pub trait AsyncTransport: Send + Sync {
    fn supports(&self, method: HttpMethod) -> bool {
        let _ = method;
        true
    }

    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let _ = request;
        unsupported(HttpMethod::Get)
    }

    async fn post(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let _ = request;
        unsupported(HttpMethod::Post)
    }

    async fn put(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let _ = request;
        unsupported(HttpMethod::Put)
    }

    async fn patch(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let _ = request;
        unsupported(HttpMethod::Patch)
    }

    async fn delete(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let _ = request;
        unsupported(HttpMethod::Delete)
    }
}

/// Send `request` through the transport method matching its verb.
pub fn send(transport: &dyn Transport, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
    match request.method {
        HttpMethod::Get => transport.get(request),
        HttpMethod::Post => transport.post(request),
        HttpMethod::Put => transport.put(request),
        HttpMethod::Patch => transport.patch(request),
        HttpMethod::Delete => transport.delete(request),
    }
}

pub async fn send_async(
    transport: &dyn AsyncTransport,
    request: &HttpRequest,
) -> Result<HttpResponse, ApiError> {
    match request.method {
        HttpMethod::Get => transport.get(request).await,
        HttpMethod::Post => transport.post(request).await,
        HttpMethod::Put => transport.put(request).await,
        HttpMethod::Patch => transport.patch(request).await,
        HttpMethod::Delete => transport.delete(request).await,
    }
}

/// The transport a client currently calls through.
#[derive(Clone)]
pub enum Driver {
    Blocking(Arc<dyn Transport>),
    Async(Arc<dyn AsyncTransport>),
}

impl Driver {
    pub fn blocking(transport: impl Transport + 'static) -> Self {
        Driver::Blocking(Arc::new(transport))
    }

    pub fn nonblocking(transport: impl AsyncTransport + 'static) -> Self {
        Driver::Async(Arc::new(transport))
    }

    pub fn supports(&self, method: HttpMethod) -> bool {
        match self {
            Driver::Blocking(transport) => transport.supports(method),
            Driver::Async(transport) => transport.supports(method),
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            Driver::Blocking(_) => "blocking",
            Driver::Async(_) => "async",
        }
    }
}

impl fmt::Debug for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Driver").field(&self.mode()).finish()
    }
}
