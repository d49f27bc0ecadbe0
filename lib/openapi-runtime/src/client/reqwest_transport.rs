use std::fmt::Debug;
use std::net::{IpAddr, Ipv4Addr};

use headers::{ContentType, HeaderMapExt};
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::uri::{PathAndQuery, Scheme};
use http::{Method, StatusCode, Uri};
use indexmap::IndexMap;
use reqwest::{Body, Request};
use tracing::{debug, warn};
use url::Url;

use super::{HttpError, RequestOptions, ResponseContent, Transport};

/// A [`Transport`] backed by a [`reqwest::Client`].
///
/// Endpoint uris are resolved against the configured base uri. Use
/// [`ReqwestTransportBuilder`] to create instances.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_uri: Uri,
    default_headers: IndexMap<String, String>,
}

impl ReqwestTransport {
    /// Starts building a transport.
    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::default()
    }

    /// The base uri every request is resolved against.
    pub fn base_uri(&self) -> &Uri {
        &self.base_uri
    }

    fn build_url(&self, uri: &str, options: &RequestOptions) -> Result<Url, HttpError> {
        let base_uri = self.base_uri.to_string();
        let url = format!(
            "{}/{}",
            base_uri.trim_end_matches('/'),
            uri.trim_start_matches('/')
        );
        let mut url = url.parse::<Url>()?;

        if !options.query().is_empty() {
            url.query_pairs_mut().extend_pairs(options.query());
        }

        Ok(url)
    }

    fn build_request(
        &self,
        method: Method,
        url: Url,
        options: &RequestOptions,
    ) -> Result<Request, HttpError> {
        let mut request = Request::new(method, url);
        let req_headers = request.headers_mut();

        for (name, value) in self.default_headers.iter().chain(options.headers()) {
            req_headers.insert(
                HeaderName::from_bytes(name.as_bytes())?,
                HeaderValue::from_str(value)?,
            );
        }

        let body = match (options.json(), options.form()) {
            (Some(json), form) => {
                if form.is_some() {
                    warn!("both JSON body and form data are set, form data is ignored");
                }
                req_headers.typed_insert(ContentType::json());
                Some(Body::from(json.to_string()))
            }
            (None, Some(form)) => {
                req_headers.typed_insert(ContentType::form_url_encoded());
                Some(Body::from(serde_urlencoded::to_string(form)?))
            }
            (None, None) => None,
        };
        *request.body_mut() = body;

        Ok(request)
    }
}

impl Transport for ReqwestTransport {
    type Response = BufferedResponse;
    type Error = HttpError;

    async fn send(
        &self,
        method: &Method,
        uri: &str,
        options: &RequestOptions,
    ) -> Result<Self::Response, Self::Error> {
        let url = self.build_url(uri, options)?;
        let request = self.build_request(method.clone(), url, options)?;

        debug!(?request, "sending...");
        let response = self.client.execute(request).await?;
        debug!(?response, "...receiving");

        let status = response.status();
        let headers = response.headers().clone();
        let content = response.text().await?;

        Ok(BufferedResponse {
            status,
            headers,
            content,
        })
    }
}

/// A fully read response.
#[derive(Debug, Clone)]
pub struct BufferedResponse {
    status: StatusCode,
    headers: HeaderMap,
    content: String,
}

impl BufferedResponse {
    /// The status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl ResponseContent for BufferedResponse {
    fn content(&self) -> &str {
        &self.content
    }
}

/// Builder for [`ReqwestTransport`].
///
/// # Default Configuration
///
/// - **Scheme**: HTTP (use `with_scheme()` to change to HTTPS)
/// - **Host**: 127.0.0.1 (localhost)
/// - **Port**: 80 (standard HTTP port)
/// - **Base path**: None (requests go to root path)
/// - **Default headers**: none
///
/// # Example
///
/// ```rust
/// use http::uri::Scheme;
/// use openapi_runtime::ReqwestTransport;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = ReqwestTransport::builder()
///     .with_scheme(Scheme::HTTPS)
///     .with_host("petstore.example.com")
///     .with_port(443)
///     .with_base_path("/v3")?
///     .add_default_header("Accept", "application/json")
///     .build()?;
///
/// assert_eq!(transport.base_uri().to_string(), "https://petstore.example.com:443/v3");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestTransportBuilder {
    client: reqwest::Client,
    scheme: Scheme,
    host: String,
    port: u16,
    base_path: Option<PathAndQuery>,
    default_headers: IndexMap<String, String>,
}

impl ReqwestTransportBuilder {
    /// Builds the transport.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::HttpError`] when the base uri cannot be built from
    /// the scheme, host and port.
    pub fn build(self) -> Result<ReqwestTransport, HttpError> {
        let Self {
            client,
            scheme,
            host,
            port,
            base_path,
            default_headers,
        } = self;

        let builder = Uri::builder()
            .scheme(scheme)
            .authority(format!("{host}:{port}"));
        let builder = if let Some(path) = &base_path {
            builder.path_and_query(path.path())
        } else {
            builder.path_and_query("/")
        };
        let base_uri = builder.build()?;

        Ok(ReqwestTransport {
            client,
            base_uri,
            default_headers,
        })
    }

    /// Uses a preconfigured reqwest client, for timeouts or proxies.
    #[must_use]
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Sets the HTTP scheme.
    #[must_use]
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Sets the hostname or IP address of the API server.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the port number.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the base path prepended to every endpoint uri.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidBasePath`] if the path contains invalid characters
    /// (such as spaces) or cannot be parsed as a valid URI path.
    pub fn with_base_path<P>(mut self, base_path: P) -> Result<Self, HttpError>
    where
        P: TryInto<PathAndQuery>,
        P::Error: Debug + 'static,
    {
        let base_path = base_path
            .try_into()
            .map_err(|err| HttpError::InvalidBasePath {
                error: format!("{err:?}"),
            })?;
        self.base_path = Some(base_path);
        Ok(self)
    }

    /// Adds a header sent with every request.
    ///
    /// Headers from [`RequestOptions`] take precedence.
    #[must_use]
    pub fn add_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }
}

impl Default for ReqwestTransportBuilder {
    fn default() -> Self {
        Self {
            client: reqwest::Client::new(),
            scheme: Scheme::HTTP,
            host: IpAddr::V4(Ipv4Addr::LOCALHOST).to_string(),
            port: 80,
            base_path: None,
            default_headers: IndexMap::new(),
        }
    }
}
