//! Endpoint registry.

use std::collections::HashMap;

use tracing::debug;

use crate::endpoint::{Endpoint, ResolvedEndpoint};
use crate::error::ApiError;
use crate::signature::{Mode, Signature, ASYNC_PREFIX};

/// A registered endpoint together with its generated signature.
#[derive(Debug, Clone, PartialEq)]
pub struct Registered {
    pub endpoint: ResolvedEndpoint,
    pub signature: Signature,
}

/// Endpoints keyed by name. Registering a name twice replaces the first
/// entry; there is no removal.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: HashMap<String, Registered>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve and store every endpoint.
    ///
    /// All endpoints are resolved before any is stored, so a failing batch
    /// leaves the registry unchanged.
    pub fn register<I>(&mut self, endpoints: I) -> Result<(), ApiError>
    where
        I: IntoIterator<Item = Endpoint>,
    {
        let resolved = endpoints
            .into_iter()
            .map(Endpoint::resolve)
            .collect::<Result<Vec<_>, _>>()?;

        for endpoint in resolved {
            debug!(
                endpoint = endpoint.name(),
                method = %endpoint.method(),
                path_parameters = ?endpoint.path_parameters(),
                "registered endpoint"
            );
            let signature = Signature::for_endpoint(&endpoint);
            let name = endpoint.name().to_string();
            if self
                .entries
                .insert(name, Registered { endpoint, signature })
                .is_some()
            {
                debug!("replaced an earlier registration");
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Registered> {
        self.entries.get(name)
    }

    pub fn lookup(&self, name: &str) -> Result<&Registered, ApiError> {
        self.get(name).ok_or_else(|| ApiError::EndpointNotFound {
            name: name.to_string(),
        })
    }

    /// Find the entry behind a generated method name.
    ///
    /// An exact endpoint name wins over stripping the async prefix, so an
    /// endpoint literally named `async_x` stays reachable.
    pub fn method(&self, method_name: &str) -> Option<(&Registered, Mode)> {
        if let Some(entry) = self.get(method_name) {
            return Some((entry, Mode::Blocking));
        }
        let name = method_name.strip_prefix(ASYNC_PREFIX)?;
        self.get(name).map(|entry| (entry, Mode::Async))
    }

    /// Both generated method names of every endpoint, sorted and unique.
    ///
    /// When endpoints `x` and `async_x` are both registered, `async_x` names
    /// the second endpoint only; the async entry point of `x` is shadowed and
    /// [`method`](Self::method) resolves `async_x` to the exact match.
    pub fn method_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .values()
            .flat_map(|entry| [entry.signature.name.clone(), entry.signature.async_name()])
            .collect();
        names.sort();
        names.dedup();
        names
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
