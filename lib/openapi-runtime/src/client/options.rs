use indexmap::IndexMap;
use serde_json::Value;

/// Options handed to a [`Transport`](super::Transport) alongside the method and uri.
///
/// # Example
///
/// ```rust
/// use openapi_runtime::RequestOptions;
/// use serde_json::json;
///
/// let options = RequestOptions::new()
///     .add_query("limit", "10")
///     .add_header("X-Request-ID", "abc-123")
///     .with_json(json!({ "name": "Doggy" }));
///
/// assert_eq!(options.query().len(), 1);
/// assert!(options.form().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    query: Vec<(String, String)>,
    headers: IndexMap<String, String>,
    json: Option<Value>,
    form: Option<Value>,
}

impl RequestOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a query pair. Repeating a name sends it several times.
    #[must_use]
    pub fn add_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Sets a header, replacing any previous value.
    #[must_use]
    pub fn add_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets a JSON body.
    #[must_use]
    pub fn with_json(mut self, json: Value) -> Self {
        self.json = Some(json);
        self
    }

    /// Sets an `application/x-www-form-urlencoded` body.
    #[must_use]
    pub fn with_form(mut self, form: Value) -> Self {
        self.form = Some(form);
        self
    }

    /// The query pairs, in insertion order.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// The headers.
    pub fn headers(&self) -> &IndexMap<String, String> {
        &self.headers
    }

    /// The JSON body.
    pub fn json(&self) -> Option<&Value> {
        self.json.as_ref()
    }

    /// The form body.
    pub fn form(&self) -> Option<&Value> {
        self.form.as_ref()
    }

    /// Whether nothing was set.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.headers.is_empty() && self.json.is_none() && self.form.is_none()
    }
}
