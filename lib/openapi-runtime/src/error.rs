/// Errors raised while assembling an endpoint request.
///
/// These are all detected synchronously, before anything is handed to a transport.
#[derive(Debug, derive_more::Error, derive_more::Display)]
pub enum EndpointError {
    /// One or more parameters are neither whitelisted nor route parameters.
    ///
    /// Occurs when calling [`Endpoint::with_params`](crate::Endpoint::with_params)
    /// with unknown keys. Every offending key is reported, never only the first one.
    #[display("{}", invalid_parameter_message(invalid, allowed))]
    InvalidParameter {
        /// The rejected parameter names, in input order.
        invalid: Vec<String>,
        /// Every name the endpoint accepts.
        allowed: Vec<String>,
    },

    /// A route parameter declared by the endpoint has no value.
    ///
    /// Occurs when resolving the uri before the parameter was set, or when it was set to `null`.
    #[display("Route parameter '{name}' is missing for uri '{uri}'")]
    MissingRouteParam {
        /// The missing route parameter.
        name: String,
        /// The uri template being resolved.
        uri: String,
    },

    /// A parameter value cannot be written into a uri or a query string.
    ///
    /// Occurs with objects, or with arrays nested inside arrays.
    #[display("Unsupported value for parameter '{name}': {value}")]
    UnsupportedParameterValue {
        /// The parameter name.
        name: String,
        /// The offending value.
        value: serde_json::Value,
    },

    /// A JSON scalar was given where a map or a list is required.
    #[display("Unsupported payload, expected an object or an array. Got: {value}")]
    UnsupportedPayload {
        /// The offending value.
        value: serde_json::Value,
    },
}

fn invalid_parameter_message(invalid: &[String], allowed: &[String]) -> String {
    let names = invalid
        .iter()
        .map(|name| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let allowed = allowed.join(", ");
    if invalid.len() > 1 {
        format!("Parameters {names} are not allowed. Allowed parameters: {allowed}")
    } else {
        format!("Parameter {names} is not allowed. Allowed parameters: {allowed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<EndpointError>();
        assert_sync::<EndpointError>();
    }

    #[test]
    fn should_name_a_single_invalid_parameter() {
        let error = EndpointError::InvalidParameter {
            invalid: vec!["foo".to_string()],
            allowed: vec!["limit".to_string(), "id".to_string()],
        };

        insta::assert_snapshot!(error, @r#"Parameter "foo" is not allowed. Allowed parameters: limit, id"#);
    }

    #[test]
    fn should_pluralize_several_invalid_parameters() {
        let error = EndpointError::InvalidParameter {
            invalid: vec!["foo".to_string(), "bar".to_string()],
            allowed: vec!["limit".to_string()],
        };

        insta::assert_snapshot!(error, @r#"Parameters "foo", "bar" are not allowed. Allowed parameters: limit"#);
    }

    #[test]
    fn should_display_missing_route_param() {
        let error = EndpointError::MissingRouteParam {
            name: "id".to_string(),
            uri: "/things/{id}".to_string(),
        };

        insta::assert_snapshot!(error, @"Route parameter 'id' is missing for uri '/things/{id}'");
    }
}
