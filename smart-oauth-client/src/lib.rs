//! A SMART on FHIR client for the OAuth2 authorization-code flow.
//!
//! [`SmartAuthClient`] builds the authorization redirect, validates the callback and redeems
//! the code at the token endpoint, then reads FHIR resources with the resulting bearer token.
//! Web framework glue (routes, cookies, HTML) is left to the host, which passes its own
//! session identifier into every operation.
pub mod bundle;
pub mod config;
mod error;
mod fhir_client;
pub mod http_client;
mod oauth_client;
mod server_agent;
pub mod store;
mod types;
mod utils;

pub use config::ClientConfig;
pub use error::{Error, Result};
pub use fhir_client::FhirClient;
pub use oauth_client::{SmartAuthClient, SmartAuthClientConfig};
pub use types::{AuthorizationRequest, CallbackParams, OAuthTokenResponse, PatientSummary, TokenSet};
