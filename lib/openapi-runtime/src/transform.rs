//! Pure helpers used to clean parameters and payloads.
//!
//! Every helper takes its input by value and returns a new value, so callers
//! keep full control over what they share.

use std::borrow::Cow;

use indexmap::IndexMap;

use crate::payload::Payload;

/// Markers shared by generated endpoints.
///
/// # Default Configuration
///
/// - **Repeatable marker**: `[]`, as in a whitelist entry `tags[]`
/// - **Reserved prefix**: `_`, as in a payload key `_1` standing for field `1`
///
/// # Example
///
/// ```rust
/// use openapi_runtime::TransformConfig;
///
/// let config = TransformConfig::default()
///     .with_repeatable_marker("*")
///     .with_reserved_prefix("n_");
///
/// assert_eq!(config.strip_repeatable_marker("tags*"), "tags");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformConfig {
    repeatable_marker: Cow<'static, str>,
    reserved_prefix: Cow<'static, str>,
}

impl TransformConfig {
    /// Sets the suffix marking a whitelist entry as repeatable.
    #[must_use]
    pub fn with_repeatable_marker(mut self, marker: impl Into<Cow<'static, str>>) -> Self {
        self.repeatable_marker = marker.into();
        self
    }

    /// Sets the prefix stripped from payload keys.
    #[must_use]
    pub fn with_reserved_prefix(mut self, prefix: impl Into<Cow<'static, str>>) -> Self {
        self.reserved_prefix = prefix.into();
        self
    }

    /// The repeatable marker.
    pub fn repeatable_marker(&self) -> &str {
        &self.repeatable_marker
    }

    /// The reserved key prefix.
    pub fn reserved_prefix(&self) -> &str {
        &self.reserved_prefix
    }

    /// Removes the repeatable marker from a whitelist entry, if present.
    pub fn strip_repeatable_marker<'a>(&self, name: &'a str) -> &'a str {
        if self.repeatable_marker.is_empty() {
            return name;
        }
        name.strip_suffix(self.repeatable_marker.as_ref())
            .unwrap_or(name)
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            repeatable_marker: Cow::Borrowed("[]"),
            reserved_prefix: Cow::Borrowed("_"),
        }
    }
}

/// Drops entries whose value is `null`.
pub fn reject_null_values(payload: Payload) -> Payload {
    payload.retain(|value| !value.is_null())
}

/// Drops entries whose value is an empty array.
pub fn reject_empty_array_values(payload: Payload) -> Payload {
    payload.retain(|value| !value.is_empty_array())
}

/// Strips `prefix` from every key starting with it.
///
/// An empty prefix leaves the payload untouched, as do sequential payloads.
pub fn remove_prefix_from_keys(payload: Payload, prefix: &str) -> Payload {
    if prefix.is_empty() {
        return payload;
    }
    payload.rename_keys(|key| match key.strip_prefix(prefix) {
        Some(stripped) => stripped.to_string(),
        None => key,
    })
}

/// Converts every key of a keyed payload to `snake_case`.
pub fn to_snake_cased_keys(payload: Payload) -> Payload {
    payload.rename_keys(|key| snake_case(&key))
}

/// Whether the payload is sequential rather than keyed.
pub fn is_list(payload: &Payload) -> bool {
    payload.is_list()
}

/// Converts a single key to `snake_case`.
pub fn snake_case(key: &str) -> String {
    use cruet::*;
    key.to_snake_case()
}

/// Renames every key of a map, keeping insertion order.
///
/// When two keys collide after renaming, the last value wins at the position of the first key.
pub fn rename_keys<V>(
    entries: IndexMap<String, V>,
    mut rename: impl FnMut(String) -> String,
) -> IndexMap<String, V> {
    let mut result = IndexMap::with_capacity(entries.len());
    for (key, value) in entries {
        result.insert(rename(key), value);
    }
    result
}
