use std::fmt::Debug;
use std::sync::Arc;

use serde_json::Value;

/// A value wrapping a single scalar, like a generated enum or an identifier newtype.
///
/// Parameters holding a value object are unwrapped to the scalar before being stored.
///
/// # Example
///
/// ```rust
/// use openapi_runtime::ValueObject;
/// use serde_json::{Value, json};
///
/// #[derive(Debug)]
/// enum Status {
///     Available,
///     Sold,
/// }
///
/// impl ValueObject for Status {
///     fn to_value(&self) -> Value {
///         match self {
///             Self::Available => json!("available"),
///             Self::Sold => json!("sold"),
///         }
///     }
/// }
/// ```
pub trait ValueObject: Debug + Send + Sync {
    /// Extracts the underlying scalar.
    fn to_value(&self) -> Value;
}

/// A structured read-only value, typically a generated model.
///
/// Records found in a list payload are converted to their generic structure.
pub trait Record: Debug + Send + Sync {
    /// Converts the record into a generic JSON structure.
    fn to_structure(&self) -> Value;
}

/// A parameter or payload entry.
///
/// Either plain JSON data, or one of the two capabilities generated code hands over.
#[derive(Debug, Clone, derive_more::From)]
pub enum FieldValue {
    /// Plain JSON data.
    Json(Value),
    /// A value object, unwrapped on demand.
    #[from(skip)]
    Scalar(Arc<dyn ValueObject>),
    /// A record, converted on demand.
    #[from(skip)]
    Record(Arc<dyn Record>),
}

impl FieldValue {
    /// Wraps a value object.
    pub fn value_object(value: impl ValueObject + 'static) -> Self {
        Self::Scalar(Arc::new(value))
    }

    /// Wraps a record.
    pub fn record(record: impl Record + 'static) -> Self {
        Self::Record(Arc::new(record))
    }

    /// Whether this resolves to a JSON `null`.
    ///
    /// Value objects and records are checked on their resolved JSON.
    pub fn is_null(&self) -> bool {
        match self {
            Self::Json(value) => value.is_null(),
            Self::Scalar(_) | Self::Record(_) => self.to_json().is_null(),
        }
    }

    /// Whether this resolves to an empty JSON array.
    pub fn is_empty_array(&self) -> bool {
        let is_empty = |value: &Value| value.as_array().is_some_and(Vec::is_empty);
        match self {
            Self::Json(value) => is_empty(value),
            Self::Scalar(_) | Self::Record(_) => is_empty(&self.to_json()),
        }
    }

    /// Converts a record into its generic structure, leaving other values untouched.
    #[must_use]
    pub fn resolve_record(self) -> Self {
        match self {
            Self::Record(record) => Self::Json(record.to_structure()),
            other => other,
        }
    }

    /// Resolves this entry to an owned JSON value.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Json(value) => value.clone(),
            Self::Scalar(scalar) => scalar.to_value(),
            Self::Record(record) => record.to_structure(),
        }
    }

    /// Converts this entry into JSON.
    pub fn into_json(self) -> Value {
        match self {
            Self::Json(value) => value,
            other => other.to_json(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Json(Value::from(value))
    }
}
