use crate::EndpointError;

/// Errors returned by [`ClientWrapper`](super::ClientWrapper).
///
/// Transport failures are carried as-is in [`ClientError::Transport`].
#[derive(Debug, derive_more::Error, derive_more::Display)]
pub enum ClientError<E> {
    /// The transport failed.
    ///
    /// The inner error is the one returned by the transport, untouched.
    Transport(E),

    /// A non-empty response body is not valid JSON.
    ///
    /// The response is still available through [`ClientWrapper::response`](super::ClientWrapper::response).
    #[display("Failed to decode JSON response: {error}\n{body}")]
    Decode {
        /// The underlying JSON parsing error.
        #[error(source)]
        error: serde_json::Error,
        /// The response body that failed to parse.
        body: String,
    },

    /// The endpoint could not be turned into a request.
    Endpoint(EndpointError),
}

impl<E> ClientError<E> {
    /// Returns the transport error, if this is one.
    pub fn into_transport(self) -> Option<E> {
        match self {
            Self::Transport(error) => Some(error),
            Self::Decode { .. } | Self::Endpoint(_) => None,
        }
    }

    /// Whether the response body could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

impl<E> From<EndpointError> for ClientError<E> {
    fn from(value: EndpointError) -> Self {
        Self::Endpoint(value)
    }
}

/// Errors of [`ReqwestTransport`](super::ReqwestTransport).
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum HttpError {
    /// HTTP client error from the underlying reqwest library.
    ///
    /// Occurs when network requests fail, timeouts occur, or connection issues arise.
    ReqwestError(reqwest::Error),

    /// URL parsing error when joining the base uri and the endpoint uri.
    UrlError(url::ParseError),

    /// HTTP protocol error from the http crate.
    ///
    /// Occurs when the base uri cannot be built.
    HttpError(http::Error),

    /// Invalid HTTP header name.
    InvalidHeaderName(http::header::InvalidHeaderName),

    /// Invalid HTTP header value.
    InvalidHeaderValue(http::header::InvalidHeaderValue),

    /// Form data cannot be encoded as `application/x-www-form-urlencoded`.
    ///
    /// Occurs with nested objects or arrays in form data.
    FormError(serde_urlencoded::ser::Error),

    /// Invalid base path configuration.
    #[display("Invalid base path: {error}")]
    #[from(skip)]
    InvalidBasePath {
        /// Description of why the base path is invalid.
        error: String,
    },
}
