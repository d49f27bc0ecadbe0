use http::Method;
use serde_json::{Map, Value};
use tracing::debug;

use crate::Endpoint;

mod error;
pub use self::error::{ClientError, HttpError};

mod options;
pub use self::options::RequestOptions;

mod transport;
pub use self::transport::{ResponseContent, Transport};

mod reqwest_transport;
pub use self::reqwest_transport::{BufferedResponse, ReqwestTransport, ReqwestTransportBuilder};


/// Issues requests through a [`Transport`] and decodes JSON responses.
///
/// The last response is kept and can be inspected with [`response`](Self::response),
/// for example to read the status code after a call.
///
/// # Example
///
/// ```rust,no_run
/// use http::Method;
/// use openapi_runtime::{ClientWrapper, ReqwestTransport, RequestOptions};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = ReqwestTransport::builder()
///     .with_host("petstore.example.com")
///     .with_base_path("/v3")?
///     .build()?;
/// let mut client = ClientWrapper::new(transport);
///
/// let pets = client
///     .request(&Method::GET, "pet/findByStatus", &RequestOptions::new().add_query("status", "sold"))
///     .await?;
///
/// let status = client.response().map(|response| response.status());
/// # Ok(())
/// # }
/// ```
///
/// # Thread Safety
///
/// Requests take `&mut self`: one wrapper serves one request sequence at a time.
#[derive(Debug)]
pub struct ClientWrapper<T: Transport> {
    transport: T,
    response: Option<T::Response>,
}

impl<T: Transport> ClientWrapper<T> {
    /// Wraps a transport.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            response: None,
        }
    }

    /// The wrapped transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The response of the last call that reached the transport successfully.
    pub fn response(&self) -> Option<&T::Response> {
        self.response.as_ref()
    }

    /// Sends a request and decodes the JSON body.
    ///
    /// An empty body decodes to an empty object.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Transport`] with the transport error, unchanged
    /// - [`ClientError::Decode`] when a non-empty body is not valid JSON
    pub async fn request(
        &mut self,
        method: &Method,
        uri: &str,
        options: &RequestOptions,
    ) -> Result<Value, ClientError<T::Error>> {
        debug!(%method, %uri, "sending...");
        let response = self
            .transport
            .send(method, uri, options)
            .await
            .map_err(ClientError::Transport)?;
        debug!(?response, "...receiving");

        let response = self.response.insert(response);
        decode_body(response.content())
    }

    /// Sends the request assembled by an endpoint.
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request), plus [`ClientError::Endpoint`] when the endpoint
    /// uri or options cannot be built.
    pub async fn send(&mut self, endpoint: &Endpoint) -> Result<Value, ClientError<T::Error>> {
        let uri = endpoint.uri()?;
        let options = endpoint.to_request_options()?;
        self.request(endpoint.method(), &uri, &options).await
    }
}

fn decode_body<E>(content: &str) -> Result<Value, ClientError<E>> {
    if content.is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_str(content).map_err(|error| ClientError::Decode {
        error,
        body: content.to_string(),
    })
}
