#[cfg(feature = "default-client")]
pub mod default;

use http::{Request, Response};
use std::future::Future;

/// An abstract HTTP client.
///
/// Every outbound call of this crate (token endpoint, FHIR server) goes through this trait,
/// so hosts can plug in their own transport or a recording double in tests.
#[cfg_attr(not(target_arch = "wasm32"), trait_variant::make(Send))]
pub trait HttpClient {
    /// Send an HTTP request and return the response.
    fn send_http(
        &self,
        request: Request<Vec<u8>>,
    ) -> impl Future<
        Output = core::result::Result<
            Response<Vec<u8>>,
            Box<dyn std::error::Error + Send + Sync + 'static>,
        >,
    >;
}
