use std::borrow::Cow;

use http::Method;

use crate::transform::TransformConfig;

/// Static metadata of a generated endpoint.
///
/// A generated endpoint type builds its descriptor once, usually in a `static`,
/// and creates a fresh [`Endpoint`](super::Endpoint) from it for each request.
///
/// # Example
///
/// ```rust
/// use http::Method;
/// use openapi_runtime::EndpointDescriptor;
///
/// let descriptor = EndpointDescriptor::new(Method::GET, "/pets/{petId}/photos")
///     .with_route_params(["petId"])
///     .with_param_whitelist(["limit", "tags[]"])
///     .with_snake_cased_body(true);
///
/// assert!(descriptor.accepts("tags"));
/// assert!(descriptor.accepts("petId"));
/// assert!(!descriptor.accepts("offset"));
/// ```
#[derive(Debug, Clone)]
pub struct EndpointDescriptor {
    method: Method,
    uri: Cow<'static, str>,
    route_params: Vec<Cow<'static, str>>,
    param_whitelist: Vec<Cow<'static, str>>,
    snake_cased_params: bool,
    snake_cased_body: bool,
    snake_cased_form_data: bool,
    config: TransformConfig,
}

impl EndpointDescriptor {
    /// Creates a descriptor without route parameters nor whitelisted parameters.
    pub fn new(method: Method, uri: impl Into<Cow<'static, str>>) -> Self {
        Self {
            method,
            uri: uri.into(),
            route_params: Vec::new(),
            param_whitelist: Vec::new(),
            snake_cased_params: false,
            snake_cased_body: false,
            snake_cased_form_data: false,
            config: TransformConfig::default(),
        }
    }

    /// Declares the route parameters, in substitution order.
    #[must_use]
    pub fn with_route_params<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        self.route_params = names.into_iter().map(Into::into).collect();
        self
    }

    /// Declares the accepted parameter names.
    ///
    /// Entries ending with the repeatable marker (see [`TransformConfig`]) accept arrays
    /// that are sent as repeated query pairs.
    #[must_use]
    pub fn with_param_whitelist<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        self.param_whitelist = names.into_iter().map(Into::into).collect();
        self
    }

    /// Converts parameter keys to `snake_case` by default.
    #[must_use]
    pub fn with_snake_cased_params(mut self, snake_cased: bool) -> Self {
        self.snake_cased_params = snake_cased;
        self
    }

    /// Converts body keys to `snake_case` by default.
    #[must_use]
    pub fn with_snake_cased_body(mut self, snake_cased: bool) -> Self {
        self.snake_cased_body = snake_cased;
        self
    }

    /// Converts form data keys to `snake_case` by default.
    #[must_use]
    pub fn with_snake_cased_form_data(mut self, snake_cased: bool) -> Self {
        self.snake_cased_form_data = snake_cased;
        self
    }

    /// Replaces the markers configuration.
    #[must_use]
    pub fn with_config(mut self, config: TransformConfig) -> Self {
        self.config = config;
        self
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The uri template, with `{name}` placeholders.
    pub fn uri_template(&self) -> &str {
        &self.uri
    }

    /// The route parameter names, in substitution order.
    pub fn route_params(&self) -> impl Iterator<Item = &str> + '_ {
        self.route_params.iter().map(|name| &**name)
    }

    /// The whitelist entries, markers included.
    pub fn param_whitelist(&self) -> impl Iterator<Item = &str> + '_ {
        self.param_whitelist.iter().map(|name| &**name)
    }

    /// The markers configuration.
    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    pub(super) fn snake_cased_params(&self) -> bool {
        self.snake_cased_params
    }

    pub(super) fn snake_cased_body(&self) -> bool {
        self.snake_cased_body
    }

    pub(super) fn snake_cased_form_data(&self) -> bool {
        self.snake_cased_form_data
    }

    /// Whether `name` is a whitelisted parameter, ignoring the repeatable marker.
    pub fn is_whitelisted(&self, name: &str) -> bool {
        self.whitelist_entry(name).is_some()
    }

    /// Whether `name` is a route parameter.
    pub fn is_route_param(&self, name: &str) -> bool {
        self.route_params().any(|route_param| route_param == name)
    }

    /// Whether `name` is accepted by [`Endpoint::with_params`](super::Endpoint::with_params).
    pub fn accepts(&self, name: &str) -> bool {
        self.is_whitelisted(name) || self.is_route_param(name)
    }

    /// Every accepted name, whitelist first, markers stripped, without duplicates.
    pub fn allowed_params(&self) -> Vec<String> {
        let mut allowed: Vec<String> = Vec::new();
        let names = self
            .param_whitelist()
            .map(|entry| self.config.strip_repeatable_marker(entry))
            .chain(self.route_params());
        for name in names {
            if !allowed.iter().any(|known| known == name) {
                allowed.push(name.to_string());
            }
        }
        allowed
    }

    /// The whitelist entry matching `name`, marker included.
    pub(super) fn whitelist_entry(&self, name: &str) -> Option<&str> {
        self.param_whitelist()
            .find(|entry| self.config.strip_repeatable_marker(entry) == name)
    }
}
