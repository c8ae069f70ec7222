//! Client configuration for the [`SmartAuthClient`](crate::SmartAuthClient).
mod env;
mod file;

pub use self::env::{EnvLoader, DEFAULT_PREFIX};
pub use self::file::FileLoader;
use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("missing required setting `{0}`")]
    Missing(&'static str),
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("unsupported config file format: {0:?}")]
    UnsupportedFormat(Option<String>),
    #[error("loading config error: {0}")]
    Load(Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// Registration and endpoint settings of a SMART on FHIR client.
///
/// The value is loaded once and never mutated; the client keeps it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub client_id: String,
    /// Only confidential clients have one. Public clients omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    /// Space-delimited scopes, e.g. `launch openid fhirUser patient/Patient.read`.
    pub scope: String,
    pub authorize_endpoint: String,
    pub token_endpoint: String,
    /// Also sent as the `aud` parameter of the authorization request.
    pub fhir_base_url: String,
}

impl ClientConfig {
    /// Loads the configuration from the provided loader and validates it.
    pub async fn load(loader: &impl Loader) -> Result<Self, Error> {
        loader.load().await.map_err(Error::Load)?.validate()
    }
    /// Checks required settings and normalizes an empty `client_secret` to `None`.
    pub fn validate(mut self) -> Result<Self, Error> {
        if self.client_id.trim().is_empty() {
            return Err(Error::Missing("client_id"));
        }
        if self.redirect_uri.trim().is_empty() {
            return Err(Error::Missing("redirect_uri"));
        }
        for (field, value) in [
            ("authorize_endpoint", &self.authorize_endpoint),
            ("token_endpoint", &self.token_endpoint),
            ("fhir_base_url", &self.fhir_base_url),
        ] {
            check_url(field, value)?;
        }
        // resource paths are joined onto the base url
        if self.fhir_base_url.contains(['?', '#']) {
            return Err(Error::Invalid {
                field: "fhir_base_url",
                reason: format!("must not carry a query or fragment: {}", self.fhir_base_url),
            });
        }
        if self.client_secret.as_deref().is_some_and(str::is_empty) {
            self.client_secret = None;
        }
        Ok(self)
    }
    /// The scopes as individual permission strings.
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.scope.split_whitespace()
    }
}

fn check_url(field: &'static str, value: &str) -> Result<(), Error> {
    let uri = value
        .parse::<http::Uri>()
        .map_err(|e| Error::Invalid { field, reason: e.to_string() })?;
    match (uri.scheme_str(), uri.host()) {
        (Some("http" | "https"), Some(_)) => Ok(()),
        _ => Err(Error::Invalid { field, reason: format!("not an absolute http(s) url: {value}") }),
    }
}

/// The trait for loading configuration data.
pub trait Loader {
    /// Loads the configuration data.
    fn load(
        &self,
    ) -> impl Future<
        Output = core::result::Result<
            ClientConfig,
            Box<dyn std::error::Error + Send + Sync + 'static>,
        >,
    > + Send;
}
