use indexmap::IndexMap;
use serde_json::Value;

use super::EndpointDescriptor;
use super::path::scalar_to_string;
use crate::EndpointError;

/// Expands whitelisted parameters into query pairs.
///
/// Scalars give one pair. Arrays give one pair per item, named after the whitelist entry
/// so that a repeatable entry like `tags[]` keeps its marker on the wire.
pub(super) fn to_query_pairs(
    descriptor: &EndpointDescriptor,
    params: &IndexMap<String, Value>,
) -> Result<Vec<(String, String)>, EndpointError> {
    let mut pairs = Vec::with_capacity(params.len());
    for (name, value) in params {
        let query_name = descriptor.whitelist_entry(name).unwrap_or(name);
        match value {
            Value::Array(items) => {
                for item in items {
                    pairs.push((query_name.to_string(), scalar_to_string(name, item)?));
                }
            }
            value => pairs.push((query_name.to_string(), scalar_to_string(name, value)?)),
        }
    }
    Ok(pairs)
}
