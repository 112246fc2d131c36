//! Per-endpoint call signatures and entry points.
//!
//! # Design
//! Every registered endpoint is reachable under two method names: its own
//! name for blocking calls and `async_<name>` for async calls. Both carry a
//! [`Signature`] listing the arguments the endpoint understands, so callers
//! and tooling can see the call shape without reading the descriptor.
//! [`EndpointMethod`] only forwards to name-based dispatch on
//! [`RestApi`](crate::client::RestApi); it adds no behavior of its own.

use std::fmt;

use crate::args::{CallArgs, BODY_KEY};
use crate::client::RestApi;
use crate::endpoint::{ParamKind, ResolvedEndpoint};
use crate::error::ApiError;
use crate::model::Output;

/// Prefix of the async method name.
pub const ASYNC_PREFIX: &str = "async_";

/// Execution mode of a generated method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Blocking,
    Async,
}

/// Type of one signature parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// The JSON request body.
    Body,
    /// A path placeholder.
    Path,
    Query(ParamKind),
}

impl ParamType {
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamType::Body => "Value",
            ParamType::Path => "String",
            ParamType::Query(kind) => kind.type_name(),
        }
    }
}

/// One optional parameter of a generated method. All default to absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub ty: ParamType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub parameters: Vec<Parameter>,
}

impl Signature {
    /// `data` for body verbs, then path parameters, then query parameters.
    pub fn for_endpoint(endpoint: &ResolvedEndpoint) -> Self {
        let mut parameters = Vec::new();
        if endpoint.method().takes_body() {
            parameters.push(Parameter {
                name: BODY_KEY.to_string(),
                ty: ParamType::Body,
            });
        }
        parameters.extend(endpoint.path_parameters().iter().map(|name| Parameter {
            name: name.clone(),
            ty: ParamType::Path,
        }));
        parameters.extend(endpoint.query_parameters().iter().map(|q| Parameter {
            name: q.name.clone(),
            ty: ParamType::Query(q.kind),
        }));
        Self {
            name: endpoint.name().to_string(),
            parameters,
        }
    }

    pub fn async_name(&self) -> String {
        format!("{ASYNC_PREFIX}{}", self.name)
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: Option<{}>", param.name, param.ty.type_name())?;
        }
        f.write_str(")")
    }
}

/// A generated method bound to its client.
///
/// `mode` records which name the handle was looked up by. The execution path
/// is chosen by the caller: [`call`](Self::call) always goes through the
/// blocking driver and [`call_async`](Self::call_async) through the async one,
/// whichever name produced the handle.
#[derive(Debug, Clone, Copy)]
pub struct EndpointMethod<'a> {
    pub(crate) api: &'a RestApi,
    pub(crate) signature: &'a Signature,
    pub(crate) mode: Mode,
}

impl<'a> EndpointMethod<'a> {
    /// The generated method name (`get_joke` or `async_get_joke`).
    pub fn name(&self) -> String {
        match self.mode {
            Mode::Blocking => self.signature.name.clone(),
            Mode::Async => self.signature.async_name(),
        }
    }

    pub fn endpoint(&self) -> &'a str {
        &self.signature.name
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn signature(&self) -> &'a Signature {
        self.signature
    }

    pub fn call(&self, args: CallArgs) -> Result<Output, ApiError> {
        self.api.call_endpoint(self.endpoint(), args)
    }

    pub async fn call_async(&self, args: CallArgs) -> Result<Output, ApiError> {
        self.api.call_async_endpoint(self.endpoint(), args).await
    }
}
