//! Declarative REST client core.
//!
//! # Overview
//! Describe a REST API as a list of [`Endpoint`]s, register them on a
//! [`RestApi`] together with a base URL and a transport [`Driver`], then call
//! endpoints by name, blocking or async. The core assembles requests and
//! interprets responses; the transport performs the I/O.
//!
//! # Design
//! - Endpoint methods are inferred from names (`get_joke` → GET,
//!   `create_basket` → POST) once, at registration.
//! - Path placeholders (`/pantry/{pantry_id}`) are required arguments; query
//!   parameters are an optional, permissive filter.
//! - Request assembly is pure and shared by both execution modes.
//! - Responses decode into an optional response model, fall back to plain
//!   JSON, then to text.
//!
//! ```no_run
//! use restapi_core::{CallArgs, Driver, Endpoint, ParamKind, RestApi, UreqTransport};
//!
//! let mut api = RestApi::new("https://api.chucknorris.io/jokes", Driver::blocking(UreqTransport::new()));
//! api.register_endpoints([
//!     Endpoint::new("get_joke", "/random").query_parameter("category", ParamKind::String),
//!     Endpoint::new("get_categories", "/categories"),
//! ])?;
//! let _joke = api.call_endpoint("get_joke", CallArgs::new().arg("category", "dev"))?;
//! # Ok::<(), restapi_core::ApiError>(())
//! ```

pub mod args;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod execute;
pub mod http;
pub mod model;
pub mod path;
pub mod prepare;
pub mod registry;
pub mod resolver;
pub mod signature;
pub mod transport;

pub use args::CallArgs;
pub use client::{RestApi, RestApiBuilder};
pub use config::ApiConfig;
pub use endpoint::{Endpoint, ParamKind, QueryParameter, ResolvedEndpoint};
pub use error::ApiError;
pub use http::{Headers, HttpMethod, HttpRequest, HttpResponse};
pub use model::{Model, ModelValue, Output};
pub use prepare::PreparedCall;
pub use signature::{EndpointMethod, Mode, Signature};
pub use transport::{AsyncTransport, Driver, Transport};

#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
