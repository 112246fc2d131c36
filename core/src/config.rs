//! Declarative client configuration.
//!
//! An [`ApiConfig`] describes a whole API in JSON: base URL, headers and the
//! endpoint list. Response models cannot be named in JSON; endpoints loaded
//! this way return untyped JSON or text.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::Headers;
use crate::prepare::default_headers;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_headers")]
    pub default_headers: BTreeMap<String, String>,
    #[serde(default)]
    pub custom_headers: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

impl ApiConfig {
    pub fn from_json(json: &str) -> Result<Self, ApiError> {
        serde_json::from_str(json).map_err(|e| ApiError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ApiError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&raw)
    }
}

/// Lowercase header names and reject ones that cannot be sent.
pub(crate) fn normalize_headers(headers: BTreeMap<String, String>) -> Result<Headers, ApiError> {
    headers
        .into_iter()
        .map(|(name, value)| normalize_header_name(&name).map(|name| (name, value)))
        .collect()
}

pub(crate) fn normalize_header_name(name: &str) -> Result<String, ApiError> {
    let valid = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b));
    if !valid {
        return Err(ApiError::Config(format!("invalid header name `{name}`")));
    }
    Ok(name.to_ascii_lowercase())
}
