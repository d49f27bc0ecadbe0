//! Request assembly for generated endpoints.
//!
//! - [`EndpointDescriptor`] - static metadata: method, uri template, route parameters, whitelist
//! - [`Endpoint`] - request state built from a descriptor: params, body, form data
//! - [`Params`] - input of [`Endpoint::with_params`]
//!
//! Endpoints are immutable builders: every `with_*` method consumes the endpoint and
//! returns the updated one, so a value cannot be changed behind another holder's back.

use std::sync::Arc;

use http::Method;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::RequestOptions;
use crate::payload::Payload;
use crate::{EndpointError, transform};

mod descriptor;
pub use self::descriptor::EndpointDescriptor;

mod params;
pub use self::params::Params;

mod path;

mod query;

#[cfg(test)]
mod tests;

/// A request being assembled for a generated endpoint.
///
/// # Example
///
/// ```rust
/// use http::Method;
/// use openapi_runtime::{Endpoint, EndpointDescriptor, Params, Payload};
/// use serde_json::json;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let descriptor = EndpointDescriptor::new(Method::PUT, "/pets/{petId}")
///     .with_route_params(["petId"])
///     .with_param_whitelist(["dryRun"]);
///
/// let endpoint = Endpoint::new(descriptor)
///     .with_params(Some(Params::new().add_param("petId", 42).add_param("dryRun", true)))?
///     .with_snake_cased_body(true)
///     .with_body(Some(Payload::try_from(json!({ "petName": "Doggy", "tags": [] }))?));
///
/// assert_eq!(endpoint.uri()?, "pets/42");
/// assert_eq!(endpoint.params().get("dryRun"), Some(&json!(true)));
/// assert!(endpoint.params().get("petId").is_none());
/// assert_eq!(endpoint.body().map(Payload::to_json), Some(json!({ "pet_name": "Doggy" })));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Endpoint {
    descriptor: Arc<EndpointDescriptor>,
    snake_cased_params: bool,
    snake_cased_body: bool,
    snake_cased_form_data: bool,
    params: IndexMap<String, Value>,
    body: Option<Payload>,
    form_data: Option<Payload>,
}

// Create
impl Endpoint {
    /// Creates an endpoint with empty request state.
    ///
    /// Snake-casing flags start from the descriptor defaults.
    pub fn new(descriptor: impl Into<Arc<EndpointDescriptor>>) -> Self {
        let descriptor = descriptor.into();
        Self {
            snake_cased_params: descriptor.snake_cased_params(),
            snake_cased_body: descriptor.snake_cased_body(),
            snake_cased_form_data: descriptor.snake_cased_form_data(),
            descriptor,
            params: IndexMap::new(),
            body: None,
            form_data: None,
        }
    }

    /// The static metadata.
    pub fn descriptor(&self) -> &EndpointDescriptor {
        &self.descriptor
    }
}

impl From<EndpointDescriptor> for Endpoint {
    fn from(value: EndpointDescriptor) -> Self {
        Self::new(value)
    }
}

// Accessors
impl Endpoint {
    /// The HTTP method.
    pub fn method(&self) -> &Method {
        self.descriptor.method()
    }

    /// The uri with every route parameter substituted, without leading slash.
    ///
    /// # Errors
    ///
    /// - [`EndpointError::MissingRouteParam`] when a route parameter is unset or `null`
    /// - [`EndpointError::UnsupportedParameterValue`] when a route value is an object
    pub fn uri(&self) -> Result<String, EndpointError> {
        path::resolve_uri(&self.descriptor, &self.params)
    }

    /// The whitelisted parameters, without `null` values.
    ///
    /// Route parameters that are not whitelisted are left out.
    pub fn params(&self) -> IndexMap<String, Value> {
        self.params
            .iter()
            .filter(|(name, value)| !value.is_null() && self.descriptor.is_whitelisted(name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    /// The cleaned body.
    pub fn body(&self) -> Option<&Payload> {
        self.body.as_ref()
    }

    /// The cleaned form data.
    pub fn form_data(&self) -> Option<&Payload> {
        self.form_data.as_ref()
    }
}

// Builders
impl Endpoint {
    /// Replaces the parameters.
    ///
    /// `None` leaves the endpoint untouched. Otherwise keys are snake-cased when enabled,
    /// validated against the whitelist and the route parameters, then value objects and
    /// records are unwrapped.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::InvalidParameter`] naming every unknown key.
    pub fn with_params(mut self, params: Option<Params>) -> Result<Self, EndpointError> {
        let Some(params) = params else {
            return Ok(self);
        };

        let params = params.into_inner();
        let params = if self.snake_cased_params {
            transform::rename_keys(params, |name| transform::snake_case(&name))
        } else {
            params
        };

        let invalid = params
            .keys()
            .filter(|name| !self.descriptor.accepts(name))
            .cloned()
            .collect::<Vec<_>>();
        if !invalid.is_empty() {
            warn!(?invalid, uri = %self.descriptor.uri_template(), "rejected parameters");
            return Err(EndpointError::InvalidParameter {
                invalid,
                allowed: self.descriptor.allowed_params(),
            });
        }

        self.params = params
            .into_iter()
            .map(|(name, value)| (name, value.into_json()))
            .collect();
        Ok(self)
    }

    /// Replaces the body with its cleaned form.
    #[must_use]
    pub fn with_body(mut self, body: Option<Payload>) -> Self {
        self.body = body.map(|body| self.clean_payload(body, self.snake_cased_body));
        self
    }

    /// Replaces the form data with its cleaned form.
    #[must_use]
    pub fn with_form_data(mut self, form_data: Option<Payload>) -> Self {
        self.form_data =
            form_data.map(|form_data| self.clean_payload(form_data, self.snake_cased_form_data));
        self
    }

    /// Toggles snake-casing of parameter keys for subsequent [`with_params`](Self::with_params) calls.
    #[must_use]
    pub fn with_snake_cased_params(mut self, snake_cased: bool) -> Self {
        self.snake_cased_params = snake_cased;
        self
    }

    /// Toggles snake-casing of body keys for subsequent [`with_body`](Self::with_body) calls.
    #[must_use]
    pub fn with_snake_cased_body(mut self, snake_cased: bool) -> Self {
        self.snake_cased_body = snake_cased;
        self
    }

    /// Toggles snake-casing of form data keys for subsequent [`with_form_data`](Self::with_form_data) calls.
    #[must_use]
    pub fn with_snake_cased_form_data(mut self, snake_cased: bool) -> Self {
        self.snake_cased_form_data = snake_cased;
        self
    }

    fn clean_payload(&self, payload: Payload, snake_cased: bool) -> Payload {
        let before = payload.len();
        let payload = transform::reject_null_values(payload);
        let payload = transform::reject_empty_array_values(payload);
        let dropped = before - payload.len();
        if dropped > 0 {
            debug!(dropped, "dropped null and empty entries");
        }

        let payload =
            transform::remove_prefix_from_keys(payload, self.descriptor.config().reserved_prefix());
        let payload = if snake_cased {
            transform::to_snake_cased_keys(payload)
        } else {
            payload
        };

        if transform::is_list(&payload) {
            payload.map_values(crate::FieldValue::resolve_record)
        } else {
            payload
        }
    }
}

// Request
impl Endpoint {
    /// Builds the transport options: query pairs, JSON body and form body.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::UnsupportedParameterValue`] when a whitelisted parameter
    /// holds an object or nested arrays.
    pub fn to_request_options(&self) -> Result<RequestOptions, EndpointError> {
        let pairs = query::to_query_pairs(&self.descriptor, &self.params())?;
        let mut options = pairs
            .into_iter()
            .fold(RequestOptions::new(), |options, (name, value)| {
                options.add_query(name, value)
            });

        if let Some(body) = &self.body {
            options = options.with_json(body.to_json());
        }
        if let Some(form_data) = &self.form_data {
            options = options.with_form(form_data.to_json());
        }

        Ok(options)
    }
}
