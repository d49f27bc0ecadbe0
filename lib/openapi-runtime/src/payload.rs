use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::EndpointError;
use crate::value::FieldValue;

/// A request body or form data.
///
/// Payloads are either keyed (a JSON object) or sequential (a JSON array).
/// Keys keep insertion order when built from an iterator or an `IndexMap`.
/// Converted from a JSON value, they follow the iteration order of `serde_json::Map`,
/// which is sorted by key.
///
/// # Example
///
/// ```rust
/// use openapi_runtime::Payload;
/// use serde_json::json;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let payload = Payload::try_from(json!({ "name": "Doggy", "tags": [] }))?;
/// assert!(!payload.is_list());
///
/// let payload: Payload = [("name", "Doggy")].into_iter().collect();
/// assert_eq!(payload.to_json(), json!({ "name": "Doggy" }));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub enum Payload {
    /// A keyed payload.
    Map(IndexMap<String, FieldValue>),
    /// A sequential payload.
    List(Vec<FieldValue>),
}

impl Payload {
    /// Whether the payload is sequential rather than keyed.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        match self {
            Self::Map(entries) => entries.len(),
            Self::List(items) => items.len(),
        }
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up a keyed entry.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        match self {
            Self::Map(entries) => entries.get(key),
            Self::List(_) => None,
        }
    }

    /// Converts the payload into JSON, unwrapping value objects and records.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect::<Map<_, _>>(),
            ),
            Self::List(items) => Value::Array(items.iter().map(FieldValue::to_json).collect()),
        }
    }

    pub(crate) fn retain(self, mut keep: impl FnMut(&FieldValue) -> bool) -> Self {
        match self {
            Self::Map(mut entries) => {
                entries.retain(|_, value| keep(value));
                Self::Map(entries)
            }
            Self::List(mut items) => {
                items.retain(|value| keep(value));
                Self::List(items)
            }
        }
    }

    pub(crate) fn rename_keys(self, rename: impl FnMut(String) -> String) -> Self {
        match self {
            Self::Map(entries) => Self::Map(crate::transform::rename_keys(entries, rename)),
            list @ Self::List(_) => list,
        }
    }

    pub(crate) fn map_values(self, mut convert: impl FnMut(FieldValue) -> FieldValue) -> Self {
        match self {
            Self::Map(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, convert(value)))
                    .collect(),
            ),
            Self::List(items) => Self::List(items.into_iter().map(convert).collect()),
        }
    }
}

impl TryFrom<Value> for Payload {
    type Error = EndpointError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(entries) => Ok(Self::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, FieldValue::Json(value)))
                    .collect(),
            )),
            Value::Array(items) => Ok(Self::List(
                items.into_iter().map(FieldValue::Json).collect(),
            )),
            value => Err(EndpointError::UnsupportedPayload { value }),
        }
    }
}

impl From<IndexMap<String, FieldValue>> for Payload {
    fn from(value: IndexMap<String, FieldValue>) -> Self {
        Self::Map(value)
    }
}

impl From<Vec<FieldValue>> for Payload {
    fn from(value: Vec<FieldValue>) -> Self {
        Self::List(value)
    }
}

impl<K, V> FromIterator<(K, V)> for Payload
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Map(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
