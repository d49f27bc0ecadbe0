use std::fmt::Debug;
use std::future::Future;

use http::Method;

use super::RequestOptions;

/// A response whose raw body text can be read.
pub trait ResponseContent {
    /// The raw body text.
    fn content(&self) -> &str;
}

/// The HTTP capability a [`ClientWrapper`](super::ClientWrapper) delegates to.
///
/// The crate ships [`ReqwestTransport`](super::ReqwestTransport); implement this trait to plug
/// another client or a test double.
///
/// # Example
///
/// ```rust
/// use http::Method;
/// use openapi_runtime::{RequestOptions, ResponseContent, Transport};
///
/// #[derive(Debug)]
/// struct Canned(String);
///
/// impl ResponseContent for Canned {
///     fn content(&self) -> &str {
///         &self.0
///     }
/// }
///
/// #[derive(Debug)]
/// struct CannedTransport;
///
/// impl Transport for CannedTransport {
///     type Response = Canned;
///     type Error = std::io::Error;
///
///     async fn send(
///         &self,
///         _method: &Method,
///         _uri: &str,
///         _options: &RequestOptions,
///     ) -> Result<Self::Response, Self::Error> {
///         Ok(Canned(r#"{"ok": true}"#.to_string()))
///     }
/// }
/// ```
pub trait Transport {
    /// The response type, kept by the wrapper after each call.
    type Response: ResponseContent + Debug;

    /// The transport failure, handed back to callers unchanged.
    type Error: std::error::Error + 'static;

    /// Performs the call.
    ///
    /// `uri` is relative to whatever base the transport is configured with.
    fn send(
        &self,
        method: &Method,
        uri: &str,
        options: &RequestOptions,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send;
}
