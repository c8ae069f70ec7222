use crate::error::{Error, Result};
use crate::http_client::HttpClient;
use crate::utils::{append_query, is_absolute_url, join_url, same_origin};
use http::{header, Method, Request};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Bearer-authenticated read access to a FHIR REST API.
pub struct FhirClient<T>
where
    T: HttpClient + Send + Sync + 'static,
{
    base_url: String,
    http_client: Arc<T>,
}

impl<T> FhirClient<T>
where
    T: HttpClient + Send + Sync + 'static,
{
    pub fn new(base_url: impl Into<String>, http_client: Arc<T>) -> Self {
        Self { base_url: base_url.into(), http_client }
    }
    /// The url for `path` (relative to the base url, or absolute) with `query` appended.
    ///
    /// Absolute urls must share the base url's origin, so the access token never leaves the
    /// FHIR server.
    pub fn resource_url<Q>(&self, path: &str, query: &Q) -> Result<String>
    where
        Q: Serialize + ?Sized,
    {
        if is_absolute_url(path) && !same_origin(&self.base_url, path) {
            tracing::warn!(url = %path, "refusing cross-origin fhir request");
            return Err(Error::ForeignOrigin(path.into()));
        }
        Ok(append_query(&join_url(&self.base_url, path), &serde_html_form::to_string(query)?))
    }
    /// Issues a single GET and returns the parsed document unmodified.
    pub async fn get<Q>(&self, access_token: &str, path: &str, query: &Q) -> Result<Value>
    where
        Q: Serialize + ?Sized,
    {
        let uri = self.resource_url(path, query)?;
        let req = Request::builder()
            .method(Method::GET)
            .uri(&uri)
            .header(header::AUTHORIZATION, format!("Bearer {access_token}"))
            .header(header::ACCEPT, "application/json")
            .body(Vec::new())?;
        tracing::debug!(%uri, "fhir request");
        let (parts, body) =
            self.http_client.send_http(req).await.map_err(Error::HttpClient)?.into_parts();
        if !parts.status.is_success() {
            tracing::warn!(status = %parts.status, %uri, "fhir request failed");
            return Err(Error::FhirRequestFailed {
                status: parts.status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(status = %parts.status, %uri, error = %e, "unparsable fhir response");
            Error::FhirRequestFailed {
                status: parts.status,
                body: String::from_utf8_lossy(&body).into_owned(),
            }
        })
    }
}
