use std::sync::LazyLock;

use indexmap::IndexMap;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use regex::Regex;
use serde_json::Value;
use tracing::warn;

use super::EndpointDescriptor;
use crate::EndpointError;

/// Regular expression for matching path parameters in the format `{param_name}`.
static RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(?<name>\w+)}").expect("a valid regex"));

/// Characters escaped in a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

fn replace_path_param(path: &str, param_name: &str, value: &str) -> String {
    let pattern = ["{", param_name, "}"].concat();
    path.replace(&pattern, value)
}

fn encode_path_param_value(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Converts a scalar parameter value to its string form.
///
/// `null` becomes an empty string; arrays and objects are rejected.
pub(super) fn scalar_to_string(name: &str, value: &Value) -> Result<String, EndpointError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Null => Ok(String::new()),
        Value::Array(_) | Value::Object(_) => Err(EndpointError::UnsupportedParameterValue {
            name: name.to_string(),
            value: value.clone(),
        }),
    }
}

/// Converts a route parameter value to its string form, joining arrays with `,`.
fn route_value_to_string(name: &str, value: &Value) -> Result<String, EndpointError> {
    match value {
        Value::Array(items) => {
            let items = items
                .iter()
                .map(|item| scalar_to_string(name, item))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(items.join(","))
        }
        value => scalar_to_string(name, value),
    }
}

/// Substitutes every route parameter into the uri template and strips the leading slashes.
pub(super) fn resolve_uri(
    descriptor: &EndpointDescriptor,
    params: &IndexMap<String, Value>,
) -> Result<String, EndpointError> {
    let template = descriptor.uri_template();
    let mut uri = template.to_string();

    for name in descriptor.route_params() {
        let value = params
            .get(name)
            .filter(|value| !value.is_null())
            .ok_or_else(|| EndpointError::MissingRouteParam {
                name: name.to_string(),
                uri: template.to_string(),
            })?;
        let value = route_value_to_string(name, value)?;
        uri = replace_path_param(&uri, name, &encode_path_param_value(&value));
    }

    if let Some(caps) = RE.captures(&uri) {
        let name = caps.name("name").map(|found| found.as_str());
        warn!(?name, %template, "placeholder not declared as route parameter");
    }

    Ok(uri.trim_start_matches('/').to_string())
}
