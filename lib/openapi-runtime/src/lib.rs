//! # OpenAPI Runtime
//!
//! Runtime support for API clients generated from OpenAPI descriptions.
//!
//! Generated code declares one [`EndpointDescriptor`] per operation and wraps an [`Endpoint`]
//! built from it. At call time the endpoint validates parameters, resolves the uri template and
//! cleans the body, then a [`ClientWrapper`] sends it through a [`Transport`] and decodes the
//! JSON response.
//!
//! - **[`Endpoint`]** - parameter whitelist, route parameters, payload cleaning
//! - **[`ClientWrapper`]** - request dispatch and JSON decoding
//! - **[`ReqwestTransport`]** - the bundled [`Transport`], backed by `reqwest`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::{Arc, LazyLock};
//!
//! use http::Method;
//! use openapi_runtime::{ClientWrapper, Endpoint, EndpointDescriptor, Params, ReqwestTransport};
//!
//! static FIND_PETS: LazyLock<Arc<EndpointDescriptor>> = LazyLock::new(|| {
//!     Arc::new(
//!         EndpointDescriptor::new(Method::GET, "/stores/{storeId}/pets")
//!             .with_route_params(["storeId"])
//!             .with_param_whitelist(["status", "tags[]"]),
//!     )
//! });
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = ReqwestTransport::builder()
//!     .with_host("petstore.example.com")
//!     .with_base_path("/v3")?
//!     .build()?;
//! let mut client = ClientWrapper::new(transport);
//!
//! let endpoint = Endpoint::new(Arc::clone(&FIND_PETS)).with_params(Some(
//!     Params::new()
//!         .add_param("storeId", 7)
//!         .add_param("status", "available")
//!         .add_param("tags", serde_json::json!(["dog", "cat"])),
//! ))?;
//!
//! // GET /v3/stores/7/pets?status=available&tags[]=dog&tags[]=cat
//! let pets = client.send(&endpoint).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Payload Cleaning
//!
//! Bodies and form data go through [`transform`] when set on an endpoint:
//!
//! 1. `null` values and empty arrays are dropped
//! 2. the reserved prefix (`_` by default) is removed from keys
//! 3. keys are snake-cased, when enabled
//! 4. records inside a list payload are converted to their structure
//!
//! ## Error Handling
//!
//! - [`EndpointError`] - invalid parameters, missing route parameters, unsupported values
//! - [`ClientError`] - transport failures (untouched), undecodable responses, endpoint errors
//! - [`HttpError`] - failures of the bundled [`ReqwestTransport`]

mod client;
mod endpoint;
mod error;
mod payload;
mod value;

pub mod transform;

pub use self::client::{
    BufferedResponse, ClientError, ClientWrapper, HttpError, RequestOptions, ReqwestTransport,
    ReqwestTransportBuilder, ResponseContent, Transport,
};
pub use self::endpoint::{Endpoint, EndpointDescriptor, Params};
pub use self::error::EndpointError;
pub use self::payload::Payload;
pub use self::transform::TransformConfig;
pub use self::value::{FieldValue, Record, ValueObject};
