//! Error types for the REST client core.
//!
//! # Design
//! Registration-time failures (`MissingMethodName`) and call-time failures
//! (`EndpointNotFound`, `MissingPathParameter`, `Http`, ...) share one enum so
//! every public entry point returns `Result<_, ApiError>`. Error statuses keep
//! the raw status code and body for the caller; nothing is retried or
//! swallowed here.

use thiserror::Error;

use crate::http::HttpMethod;

/// Help text attached to [`ApiError::MissingMethodName`].
pub const METHOD_NAMING_HELP: &str = "endpoint names without an explicit method must start with \
     an HTTP verb followed by an underscore (get_, post_, put_, patch_, delete_) or one of the \
     aliases create_ (POST) and update_ (PUT), e.g. `get_joke` or `create_basket`";

/// Errors returned by registration, preparation and execution.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// No explicit method was given and the name does not start with a verb.
    #[error("cannot infer HTTP method for endpoint `{name}`: {help}", help = METHOD_NAMING_HELP)]
    MissingMethodName { name: String },

    /// Dispatch targeted a name that was never registered.
    #[error("endpoint `{name}` is not registered")]
    EndpointNotFound { name: String },

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The path template references a parameter the caller did not supply.
    #[error("endpoint `{endpoint}` requires path parameter `{parameter}`")]
    MissingPathParameter { endpoint: String, parameter: String },

    /// The response JSON does not fit the declared response model.
    #[error("response could not be decoded into `{model}`")]
    Deserialization {
        model: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The request payload could not be serialized to JSON.
    #[error("request body could not be serialized")]
    Serialization(#[source] serde_json::Error),

    /// The driver does not implement the verb this endpoint needs.
    #[error("transport does not support {method}")]
    UnsupportedMethod { method: HttpMethod },

    /// A blocking call was made with an async driver, or the reverse.
    #[error("the configured driver is not {expected}; swap drivers before calling")]
    DriverMode { expected: &'static str },

    /// A typed accessor asked for a different model than the one decoded.
    #[error("response holds `{actual}`, not `{expected}`")]
    ModelMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// The transport failed before producing a response.
    #[error("transport failure")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Invalid client configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Status code of an [`ApiError::Http`] error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
