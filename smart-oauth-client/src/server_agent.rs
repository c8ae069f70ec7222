use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http_client::HttpClient;
use crate::types::{OAuthTokenResponse, TokenGrantType, TokenRequestParameters, TokenSet};
use chrono::Utc;
use http::{header, Method, Request};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
struct RequestPayload<T>
where
    T: Serialize,
{
    client_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_secret: Option<String>,
    #[serde(flatten)]
    parameters: T,
}

/// Talks to the token endpoint of the authorization server.
pub struct OAuthServerAgent<T>
where
    T: HttpClient + Send + Sync + 'static,
{
    config: Arc<ClientConfig>,
    http_client: Arc<T>,
}

impl<T> OAuthServerAgent<T>
where
    T: HttpClient + Send + Sync + 'static,
{
    pub fn new(config: Arc<ClientConfig>, http_client: Arc<T>) -> Self {
        Self { config, http_client }
    }
    /// Redeems an authorization code. A single attempt: failures are returned, never retried.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenSet> {
        let body = self.build_body(TokenRequestParameters {
            grant_type: TokenGrantType::AuthorizationCode,
            code: code.into(),
            redirect_uri: self.config.redirect_uri.clone(),
        })?;
        let req = Request::builder()
            .uri(&self.config.token_endpoint)
            .method(Method::POST)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(header::ACCEPT, "application/json")
            .body(body.into_bytes())?;
        let res = self.http_client.send_http(req).await.map_err(Error::HttpClient)?;
        let status = res.status();
        if !status.is_success() {
            let body = String::from_utf8_lossy(res.body()).into_owned();
            tracing::warn!(%status, "token endpoint rejected the authorization code");
            return Err(Error::TokenExchangeFailed { status, body });
        }
        match serde_json::from_slice::<OAuthTokenResponse>(res.body()) {
            Ok(token_response) => Ok(TokenSet::from_response(token_response, Utc::now())),
            Err(e) => {
                tracing::warn!(%status, error = %e, "malformed token response");
                Err(Error::TokenExchangeFailed {
                    status,
                    body: String::from_utf8_lossy(res.body()).into_owned(),
                })
            }
        }
    }
    fn build_body<S>(&self, parameters: S) -> Result<String>
    where
        S: Serialize,
    {
        Ok(serde_html_form::to_string(RequestPayload {
            client_id: self.config.client_id.clone(),
            client_secret: self.config.client_secret.clone(),
            parameters,
        })?)
    }
}
