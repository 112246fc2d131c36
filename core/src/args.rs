//! Caller-supplied arguments for one endpoint invocation.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// Keyword naming the request body in generated signatures.
pub const BODY_KEY: &str = "data";

/// Keyword arguments plus an optional JSON body.
///
/// Keys are matched against the endpoint's path parameters and query
/// parameter contract; keys matching neither are ignored. The key
/// [`BODY_KEY`] sets the body instead of a keyword argument.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    data: Option<Value>,
    values: BTreeMap<String, Value>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a JSON body.
    pub fn data(mut self, body: Value) -> Self {
        self.data = Some(body);
        self
    }

    /// Attach any serializable value as the JSON body.
    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(ApiError::Serialization)?;
        Ok(self.data(value))
    }

    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if key == BODY_KEY {
            return self.data(value.into());
        }
        self.values.insert(key, value.into());
        self
    }

    pub fn body(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for CallArgs
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(CallArgs::new(), |args, (k, v)| args.arg(k, v))
    }
}

/// Falsy values: null, `false`, zero, and empty strings, arrays and objects.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Text form of an argument as it appears in a URL.
///
/// Strings are inserted raw; every other value uses its JSON text.
pub fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
