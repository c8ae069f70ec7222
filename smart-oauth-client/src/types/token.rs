use super::response::OAuthTokenResponse;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TokenSet {
    pub access_token: String,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub refresh_token: Option<String>,
    pub id_token: Option<String>,

    pub patient_id: Option<String>,
    pub encounter_id: Option<String>,
    pub fhir_user: Option<String>,

    pub expires_at: Option<DateTime<Utc>>,
}

impl TokenSet {
    /// Builds a token set from a token response received at `now`.
    ///
    /// An `expires_in` too large to represent as an instant leaves the token without expiry.
    pub fn from_response(response: OAuthTokenResponse, now: DateTime<Utc>) -> Self {
        let expires_at = response
            .expires_in
            .and_then(TimeDelta::try_seconds)
            .and_then(|expires_in| now.checked_add_signed(expires_in));
        Self {
            access_token: response.access_token,
            token_type: response.token_type,
            scope: response.scope,
            refresh_token: response.refresh_token,
            id_token: response.id_token,
            patient_id: response.patient,
            encounter_id: response.encounter,
            fhir_user: response.fhir_user,
            expires_at,
        }
    }
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= Utc::now())
    }
}
