//! The REST API client.
//!
//! # Design
//! `RestApi` owns the registry and the client settings and holds the current
//! transport [`Driver`]. [`RestApi::call_endpoint`] and
//! [`RestApi::call_async_endpoint`] are the only call paths: both look the
//! endpoint up, run the shared preparer, and differ only in how the executor
//! reaches the transport. Generated methods ([`EndpointMethod`]) forward to
//! them.
//!
//! Registration and driver swaps take `&mut self`; calls take `&self`. A
//! client shared across threads must therefore be fully registered before
//! calls start, and swapping its driver needs the caller's own
//! synchronization.

use serde::de::DeserializeOwned;

use crate::args::CallArgs;
use crate::config::{normalize_header_name, normalize_headers, ApiConfig};
use crate::endpoint::{Endpoint, ResolvedEndpoint};
use crate::error::ApiError;
use crate::execute::{execute, execute_async};
use crate::http::Headers;
use crate::model::Output;
use crate::prepare::{default_headers, prepare, PreparedCall, Settings};
use crate::registry::Registry;
use crate::signature::{EndpointMethod, Signature};
use crate::transport::Driver;

/// A declarative client for one REST API.
#[derive(Debug, Clone)]
pub struct RestApi {
    settings: Settings,
    driver: Driver,
    registry: Registry,
}

impl RestApi {
    pub fn new(base_url: impl Into<String>, driver: Driver) -> Self {
        Self {
            settings: Settings::new(base_url),
            driver,
            registry: Registry::new(),
        }
    }

    pub fn builder(base_url: impl Into<String>) -> RestApiBuilder {
        RestApiBuilder::new(base_url)
    }

    /// Build a client from a loaded [`ApiConfig`].
    pub fn from_config(config: ApiConfig, driver: Driver) -> Result<Self, ApiError> {
        let mut builder = RestApiBuilder::new(config.base_url)
            .driver(driver)
            .endpoints(config.endpoints);
        builder.default_headers = normalize_headers(config.default_headers)?;
        if let Some(custom) = config.custom_headers {
            builder.custom_headers = Some(normalize_headers(custom)?);
        }
        builder.build()
    }

    pub fn base_url(&self) -> &str {
        &self.settings.base_url
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn driver(&self) -> &Driver {
        &self.driver
    }

    /// Replace the transport, returning the previous one.
    pub fn set_driver(&mut self, driver: Driver) -> Driver {
        std::mem::replace(&mut self.driver, driver)
    }

    pub fn set_custom_headers(&mut self, headers: Option<Headers>) -> Result<(), ApiError> {
        self.settings.custom_headers = headers.map(normalize_headers).transpose()?;
        Ok(())
    }

    /// Register endpoints. Names already registered are replaced.
    pub fn register_endpoints<I>(&mut self, endpoints: I) -> Result<(), ApiError>
    where
        I: IntoIterator<Item = Endpoint>,
    {
        self.registry.register(endpoints)
    }

    pub fn register_endpoint(&mut self, endpoint: Endpoint) -> Result<(), ApiError> {
        self.registry.register([endpoint])
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn endpoint(&self, name: &str) -> Option<&ResolvedEndpoint> {
        self.registry.get(name).map(|entry| &entry.endpoint)
    }

    /// Generated method names: each endpoint's name and its `async_` twin.
    pub fn method_names(&self) -> Vec<String> {
        self.registry.method_names()
    }

    /// Signature of a generated method, by either of its names.
    pub fn signature(&self, method_name: &str) -> Option<&Signature> {
        self.registry
            .method(method_name)
            .map(|(entry, _)| &entry.signature)
    }

    /// Look up a generated method by name (`get_joke` or `async_get_joke`).
    pub fn method(&self, method_name: &str) -> Result<EndpointMethod<'_>, ApiError> {
        let (entry, mode) =
            self.registry
                .method(method_name)
                .ok_or_else(|| ApiError::EndpointNotFound {
                    name: method_name.to_string(),
                })?;
        Ok(EndpointMethod {
            api: self,
            signature: &entry.signature,
            mode,
        })
    }

    /// Assemble the request for `name` without sending it.
    pub fn prepare(&self, name: &str, args: &CallArgs) -> Result<PreparedCall, ApiError> {
        let entry = self.registry.lookup(name)?;
        prepare(&self.settings, &self.driver, &entry.endpoint, args)
    }

    /// Call an endpoint through the blocking driver.
    pub fn call_endpoint(&self, name: &str, args: CallArgs) -> Result<Output, ApiError> {
        let entry = self.registry.lookup(name)?;
        let Driver::Blocking(transport) = &self.driver else {
            return Err(ApiError::DriverMode {
                expected: "blocking",
            });
        };
        let call = prepare(&self.settings, &self.driver, &entry.endpoint, &args)?;
        execute(transport.as_ref(), call)
    }

    /// Call an endpoint through the async driver.
    pub async fn call_async_endpoint(&self, name: &str, args: CallArgs) -> Result<Output, ApiError> {
        let entry = self.registry.lookup(name)?;
        let Driver::Async(transport) = &self.driver else {
            return Err(ApiError::DriverMode { expected: "async" });
        };
        let call = prepare(&self.settings, &self.driver, &entry.endpoint, &args)?;
        execute_async(transport.as_ref(), call).await
    }

    /// [`call_endpoint`](Self::call_endpoint), converted into `T`.
    pub fn call_endpoint_as<T>(&self, name: &str, args: CallArgs) -> Result<T, ApiError>
    where
        T: DeserializeOwned + 'static,
    {
        self.call_endpoint(name, args)?.deserialize()
    }

    pub async fn call_async_endpoint_as<T>(&self, name: &str, args: CallArgs) -> Result<T, ApiError>
    where
        T: DeserializeOwned + 'static,
    {
        self.call_async_endpoint(name, args).await?.deserialize()
    }
}

/// Builder for [`RestApi`].
#[derive(Debug)]
pub struct RestApiBuilder {
    base_url: String,
    driver: Option<Driver>,
    default_headers: Headers,
    custom_headers: Option<Headers>,
    endpoints: Vec<Endpoint>,
    invalid_header: Option<String>,
}

impl RestApiBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            driver: None,
            default_headers: default_headers(),
            custom_headers: None,
            endpoints: Vec::new(),
            invalid_header: None,
        }
    }

    pub fn driver(mut self, driver: Driver) -> Self {
        self.driver = Some(driver);
        self
    }

    /// Add or replace a default header.
    pub fn default_header(mut self, name: &str, value: impl Into<String>) -> Self {
        match normalize_header_name(name) {
            Ok(name) => {
                self.default_headers.insert(name, value.into());
            }
            Err(_) => self.invalid_header = Some(name.to_string()),
        }
        self
    }

    /// Add a header to the custom overlay, which wins over default headers.
    pub fn custom_header(mut self, name: &str, value: impl Into<String>) -> Self {
        match normalize_header_name(name) {
            Ok(name) => {
                self.custom_headers
                    .get_or_insert_with(Headers::new)
                    .insert(name, value.into());
            }
            Err(_) => self.invalid_header = Some(name.to_string()),
        }
        self
    }

    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    pub fn endpoints(mut self, endpoints: impl IntoIterator<Item = Endpoint>) -> Self {
        self.endpoints.extend(endpoints);
        self
    }

    pub fn build(self) -> Result<RestApi, ApiError> {
        if let Some(name) = self.invalid_header {
            return Err(ApiError::Config(format!("invalid header name `{name}`")));
        }
        let driver = self
            .driver
            .ok_or_else(|| ApiError::Config("no driver configured".to_string()))?;

        let mut api = RestApi {
            settings: Settings {
                base_url: self.base_url,
                default_headers: self.default_headers,
                custom_headers: self.custom_headers,
            },
            driver,
            registry: Registry::new(),
        };
        api.register_endpoints(self.endpoints)?;
        Ok(api)
    }
}
