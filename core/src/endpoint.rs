//! Endpoint descriptors.
//!
//! # Design
//! [`Endpoint`] is the declaration a caller writes; its method may be left
//! out. Registration turns it into a [`ResolvedEndpoint`], which always has
//! a method and the path parameters extracted from its template, so code
//! downstream of the registry never sees an unresolved descriptor.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::model::Model;
use crate::path;
use crate::resolver;

/// Expected type of a query parameter.
///
/// Only used to describe the generated call signature; values are never
/// checked against it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    #[default]
    String,
    Integer,
    Float,
    Boolean,
}

impl ParamKind {
    /// Rust type name shown in signatures.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamKind::String => "String",
            ParamKind::Integer => "i64",
            ParamKind::Float => "f64",
            ParamKind::Boolean => "bool",
        }
    }
}

/// One entry of an endpoint's query parameter contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParameter {
    pub name: String,
    #[serde(default)]
    pub kind: ParamKind,
}

/// Declaration of one named remote operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Endpoint {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub method: Option<HttpMethod>,
    #[serde(skip)]
    pub model: Option<Model>,
    #[serde(default)]
    pub query_parameters: Vec<QueryParameter>,
}

impl Endpoint {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            method: None,
            model: None,
            query_parameters: Vec::new(),
        }
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Decode successful responses into `T`.
    pub fn model<T>(mut self) -> Self
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        self.model = Some(Model::of::<T>());
        self
    }

    pub fn query_parameter(mut self, name: impl Into<String>, kind: ParamKind) -> Self {
        self.query_parameters.push(QueryParameter {
            name: name.into(),
            kind,
        });
        self
    }

    /// Fill in the method and path parameters.
    pub fn resolve(self) -> Result<ResolvedEndpoint, ApiError> {
        let method = resolver::resolve_method(&self.name, self.method)?;
        let path_parameters = path::parameters(&self.path);
        Ok(ResolvedEndpoint {
            name: self.name,
            path: self.path,
            method,
            model: self.model,
            query_parameters: self.query_parameters,
            path_parameters,
        })
    }
}

/// A registered endpoint. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEndpoint {
    name: String,
    path: String,
    method: HttpMethod,
    model: Option<Model>,
    query_parameters: Vec<QueryParameter>,
    path_parameters: Vec<String>,
}

impl ResolvedEndpoint {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    pub fn query_parameters(&self) -> &[QueryParameter] {
        &self.query_parameters
    }

    pub fn path_parameters(&self) -> &[String] {
        &self.path_parameters
    }

    pub fn accepts_query(&self, key: &str) -> bool {
        self.query_parameters.iter().any(|q| q.name == key)
    }
}
