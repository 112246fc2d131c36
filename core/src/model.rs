//! Response models and call output.
//!
//! # Design
//! Endpoints live in one registry regardless of what they return, so the
//! response model is stored type-erased: [`Model`] remembers how to decode a
//! JSON value into `T` and [`ModelValue`] holds the boxed result until the
//! caller downcasts it back to `T`.

use std::any::{type_name, Any, TypeId};
use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

type Decode = fn(Value) -> Result<Box<dyn Any + Send + Sync>, serde_json::Error>;

fn decode<T>(value: Value) -> Result<Box<dyn Any + Send + Sync>, serde_json::Error>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    let model: T = serde_json::from_value(value)?;
    Ok(Box::new(model))
}

/// Reference to a response model type.
#[derive(Clone, Copy)]
pub struct Model {
    type_id: TypeId,
    type_name: &'static str,
    decode: Decode,
}

impl Model {
    pub fn of<T>() -> Self
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            decode: decode::<T>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Build an instance of the model from decoded JSON.
    pub fn decode(&self, value: Value) -> Result<ModelValue, ApiError> {
        let value = (self.decode)(value).map_err(|source| ApiError::Deserialization {
            model: self.type_name,
            source,
        })?;
        Ok(ModelValue {
            type_name: self.type_name,
            value,
        })
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Model").field(&self.type_name).finish()
    }
}

impl PartialEq for Model {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for Model {}

/// A decoded model instance.
pub struct ModelValue {
    type_name: &'static str,
    value: Box<dyn Any + Send + Sync>,
}

impl ModelValue {
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.value.downcast_ref()
    }

    pub fn downcast<T: 'static>(self) -> Result<T, ApiError> {
        let actual = self.type_name;
        self.value
            .downcast::<T>()
            .map(|model| *model)
            .map_err(|_| ApiError::ModelMismatch {
                expected: type_name::<T>(),
                actual,
            })
    }
}

impl fmt::Debug for ModelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelValue")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Result of a successful call.
#[derive(Debug)]
pub enum Output {
    /// Body decoded into the endpoint's response model.
    Model(ModelValue),
    /// Body parsed as JSON; the endpoint declares no model.
    Json(Value),
    /// Body was not JSON.
    Text(String),
}

impl Output {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Output::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Output::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_model<T: 'static>(&self) -> Option<&T> {
        match self {
            Output::Model(model) => model.downcast_ref(),
            _ => None,
        }
    }

    /// The decoded model, if this output holds a `T`.
    pub fn into_model<T: 'static>(self) -> Result<T, ApiError> {
        match self {
            Output::Model(model) => model.downcast(),
            Output::Json(_) => Err(ApiError::ModelMismatch {
                expected: type_name::<T>(),
                actual: type_name::<Value>(),
            }),
            Output::Text(_) => Err(ApiError::ModelMismatch {
                expected: type_name::<T>(),
                actual: type_name::<String>(),
            }),
        }
    }

    /// Convert any output into `T`.
    ///
    /// Model outputs are downcast; JSON and text outputs are deserialized.
    pub fn deserialize<T>(self) -> Result<T, ApiError>
    where
        T: DeserializeOwned + 'static,
    {
        let value = match self {
            Output::Model(model) => return model.downcast(),
            Output::Json(value) => value,
            Output::Text(text) => Value::String(text),
        };
        serde_json::from_value(value).map_err(|source| ApiError::Deserialization {
            model: type_name::<T>(),
            source,
        })
    }
}
