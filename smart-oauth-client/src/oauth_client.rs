use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::fhir_client::FhirClient;
use crate::http_client::HttpClient;
use crate::server_agent::OAuthServerAgent;
use crate::store::session::{Session, SessionStore};
use crate::types::{
    AuthorizationRequest, AuthorizationRequestParameters, AuthorizationResponseType,
    CallbackParams, PatientSummary, TokenSet,
};
use crate::utils::{append_query, generate_nonce};
use serde::Serialize;
use serde_json::Value;
use smart_common::store::Store;
use std::sync::Arc;

pub struct SmartAuthClientConfig<S> {
    // Config
    pub client: ClientConfig,
    // Stores
    pub session_store: S,
}

/// A SMART on FHIR client using the OAuth2 authorization-code flow.
///
/// The client holds no per-user state. Everything that belongs to one user (the pending
/// `state`, the [`TokenSet`]) lives in the injected [`SessionStore`] under the host's session
/// identifier, so sessions of different users never see each other's data.
pub struct SmartAuthClient<S, T>
where
    S: SessionStore,
    T: HttpClient + Send + Sync + 'static,
{
    config: Arc<ClientConfig>,
    session_store: S,
    server_agent: OAuthServerAgent<T>,
    fhir_client: FhirClient<T>,
}

#[cfg(feature = "default-client")]
impl<S> SmartAuthClient<S, crate::http_client::default::DefaultHttpClient>
where
    S: SessionStore,
{
    pub fn new(config: SmartAuthClientConfig<S>) -> Result<Self> {
        Self::with_http_client(config, crate::http_client::default::DefaultHttpClient::default())
    }
}

impl<S, T> SmartAuthClient<S, T>
where
    S: SessionStore,
    T: HttpClient + Send + Sync + 'static,
{
    pub fn with_http_client(config: SmartAuthClientConfig<S>, http_client: T) -> Result<Self> {
        let client_config = Arc::new(config.client.validate()?);
        let http_client = Arc::new(http_client);
        Ok(Self {
            server_agent: OAuthServerAgent::new(client_config.clone(), http_client.clone()),
            fhir_client: FhirClient::new(client_config.fhir_base_url.clone(), http_client),
            config: client_config,
            session_store: config.session_store,
        })
    }
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl<S, T> SmartAuthClient<S, T>
where
    S: SessionStore,
    S::Error: Send + Sync + 'static,
    T: HttpClient + Send + Sync + 'static,
{
    /// Starts a login attempt for `session_id`.
    ///
    /// A fresh `state` is generated and stored as the session's only pending state, replacing
    /// whatever the session held before. No network call is made.
    pub async fn build_authorization_url(&self, session_id: &str) -> Result<AuthorizationRequest> {
        let state = generate_nonce();
        let url = self.authorization_url(&state)?;
        self.save_session(
            session_id,
            Session { pending_state: Some(state.clone()), token_set: None },
        )
        .await?;
        tracing::info!(
            authorize_endpoint = %self.config.authorize_endpoint,
            "authorization request created"
        );
        Ok(AuthorizationRequest { state, url })
    }
    fn authorization_url(&self, state: &str) -> Result<String> {
        let query = serde_html_form::to_string(AuthorizationRequestParameters {
            response_type: AuthorizationResponseType::Code,
            client_id: self.config.client_id.clone(),
            redirect_uri: self.config.redirect_uri.clone(),
            scope: self.config.scope.clone(),
            state: state.into(),
            aud: self.config.fhir_base_url.clone(),
        })?;
        Ok(append_query(&self.config.authorize_endpoint, &query))
    }
    /// Handles the redirect back from the authorization server.
    ///
    /// The pending state is consumed whatever the outcome, so a callback can never be replayed.
    /// On success the token set is stored in the session, unless the session was cleared while
    /// the code was being exchanged.
    pub async fn callback(&self, session_id: &str, params: CallbackParams) -> Result<TokenSet> {
        let expected_state = match self.load_session(session_id).await? {
            Some(mut session) => {
                let pending_state = session.pending_state.take();
                if pending_state.is_some() {
                    self.save_session(session_id, session).await?;
                }
                pending_state
            }
            None => None,
        };
        if let Some(error) = params.error {
            verify_state(params.state.as_deref(), expected_state.as_deref())?;
            tracing::warn!(%error, "authorization server returned an error");
            return Err(Error::AuthorizationDenied {
                error,
                description: params.error_description,
            });
        }
        let token_set = self
            .exchange_code_for_token(
                params.code.as_deref(),
                params.state.as_deref(),
                expected_state.as_deref(),
            )
            .await?;
        // a session cleared while the exchange was in flight stays logged out
        let Some(mut session) = self.load_session(session_id).await? else {
            tracing::warn!("session cleared during token exchange");
            return Err(Error::Unauthenticated);
        };
        session.token_set = Some(token_set.clone());
        self.save_session(session_id, session).await?;
        tracing::info!(patient_context = token_set.patient_id.is_some(), "session authenticated");
        Ok(token_set)
    }
    /// Exchanges an authorization code for a token set.
    ///
    /// `returned_state` must equal `expected_state`; this is checked before anything touches
    /// the network, and a missing expected state never matches.
    pub async fn exchange_code_for_token(
        &self,
        code: Option<&str>,
        returned_state: Option<&str>,
        expected_state: Option<&str>,
    ) -> Result<TokenSet> {
        verify_state(returned_state, expected_state)?;
        let Some(code) = code.filter(|code| !code.is_empty()) else {
            tracing::warn!("callback without authorization code");
            return Err(Error::MissingCode);
        };
        self.server_agent.exchange_code(code).await
    }
    /// The token set of `session_id`, if the session is authenticated.
    pub async fn token_set(&self, session_id: &str) -> Result<Option<TokenSet>> {
        Ok(self.load_session(session_id).await?.and_then(|session| session.token_set))
    }
    async fn authenticated(&self, session_id: &str) -> Result<TokenSet> {
        match self.token_set(session_id).await? {
            Some(token_set) if token_set.is_expired() => {
                tracing::debug!("access token expired");
                Err(Error::Unauthenticated)
            }
            Some(token_set) => Ok(token_set),
            None => Err(Error::Unauthenticated),
        }
    }
    /// Reads any FHIR resource or search with the session's access token.
    ///
    /// `path` is relative to `fhir_base_url` (e.g. `Patient/123`) or an absolute url such as a
    /// bundle's paging link. The response document is returned as is.
    pub async fn fetch_resource<Q>(&self, session_id: &str, path: &str, query: &Q) -> Result<Value>
    where
        Q: Serialize + ?Sized,
    {
        let token_set = self.authenticated(session_id).await?;
        self.fhir_client.get(&token_set.access_token, path, query).await
    }
    async fn patient_context(&self, session_id: &str) -> Result<(TokenSet, String)> {
        let token_set = self.authenticated(session_id).await?;
        let Some(patient_id) = token_set.patient_id.clone() else {
            return Err(Error::MissingPatientContext);
        };
        Ok((token_set, patient_id))
    }
    /// The `Patient` of the launch context.
    pub async fn patient(&self, session_id: &str) -> Result<Value> {
        let (token_set, patient_id) = self.patient_context(session_id).await?;
        self.fhir_client
            .get(&token_set.access_token, &format!("Patient/{patient_id}"), &[] as &[(&str, &str)])
            .await
    }
    /// `Observation` search for the launch-context patient.
    pub async fn observations(
        &self,
        session_id: &str,
        category: Option<&str>,
        count: u32,
    ) -> Result<Value> {
        let (token_set, patient_id) = self.patient_context(session_id).await?;
        let count = count.to_string();
        let mut query = vec![("patient", patient_id.as_str())];
        if let Some(category) = category {
            query.push(("category", category));
        }
        query.push(("_count", count.as_str()));
        self.fhir_client.get(&token_set.access_token, "Observation", query.as_slice()).await
    }
    /// `DocumentReference` search for the launch-context patient.
    pub async fn document_references(&self, session_id: &str, count: u32) -> Result<Value> {
        let (token_set, patient_id) = self.patient_context(session_id).await?;
        self.fhir_client
            .get(
                &token_set.access_token,
                "DocumentReference",
                &[("patient", patient_id.as_str()), ("_count", count.to_string().as_str())],
            )
            .await
    }
    /// The launch-context patient with its latest vital signs.
    ///
    /// Observations are best effort: if that search fails the summary still carries the
    /// patient, with `observations` set to `None`.
    pub async fn patient_summary(&self, session_id: &str) -> Result<PatientSummary> {
        let patient = self.patient(session_id).await?;
        let observations = match self.observations(session_id, Some("vital-signs"), 10).await {
            Ok(observations) => Some(observations),
            Err(e) => {
                tracing::warn!(error = %e, "vital signs unavailable");
                None
            }
        };
        Ok(PatientSummary { patient, observations })
    }
    /// Forgets the session's token set and pending state. Clearing an empty session is a no-op.
    pub async fn clear_session(&self, session_id: &str) -> Result<()> {
        self.session_store
            .del(&session_id.to_string())
            .await
            .map_err(|e| Error::SessionStore(Box::new(e)))?;
        tracing::info!("session cleared");
        Ok(())
    }
    async fn load_session(&self, session_id: &str) -> Result<Option<Session>> {
        self.session_store
            .get(&session_id.to_string())
            .await
            .map_err(|e| Error::SessionStore(Box::new(e)))
    }
    async fn save_session(&self, session_id: &str, session: Session) -> Result<()> {
        self.session_store
            .set(session_id.to_string(), session)
            .await
            .map_err(|e| Error::SessionStore(Box::new(e)))
    }
}

fn verify_state(returned_state: Option<&str>, expected_state: Option<&str>) -> Result<()> {
    match (returned_state, expected_state) {
        (Some(returned), Some(expected)) if returned == expected => Ok(()),
        _ => {
            tracing::warn!("authorization state mismatch");
            Err(Error::StateMismatch)
        }
    }
}
