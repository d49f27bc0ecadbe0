use indexmap::IndexMap;
use serde_json::Value;

use crate::EndpointError;
use crate::value::FieldValue;

/// Parameters given to [`Endpoint::with_params`](super::Endpoint::with_params).
///
/// # Example
///
/// ```rust
/// use openapi_runtime::{FieldValue, Params};
/// use serde_json::json;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let params = Params::new()
///     .add_param("petId", 42)
///     .add_param("tags", FieldValue::from(json!(["dog", "cat"])));
///
/// let same = Params::try_from(json!({ "petId": 42, "tags": ["dog", "cat"] }))?;
/// assert_eq!(params.len(), same.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, derive_more::Deref)]
pub struct Params(IndexMap<String, FieldValue>);

impl Params {
    /// Creates empty parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, replacing any previous value with the same name.
    #[must_use]
    pub fn add_param(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Unwraps the parameters.
    pub fn into_inner(self) -> IndexMap<String, FieldValue> {
        self.0
    }
}

impl From<IndexMap<String, FieldValue>> for Params {
    fn from(value: IndexMap<String, FieldValue>) -> Self {
        Self(value)
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

impl TryFrom<Value> for Params {
    type Error = EndpointError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(entries) => Ok(entries.into_iter().collect()),
            value => Err(EndpointError::UnsupportedPayload { value }),
        }
    }
}

impl IntoIterator for Params {
    type Item = (String, FieldValue);
    type IntoIter = indexmap::map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
