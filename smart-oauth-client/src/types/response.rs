use serde::{Deserialize, Serialize};

// https://datatracker.ietf.org/doc/html/rfc6749#section-5.1
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OAuthTokenResponse {
    pub access_token: String,
    pub token_type: Option<String>,
    pub expires_in: Option<i64>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub id_token: Option<String>,
    // SMART launch context
    // https://hl7.org/fhir/smart-app-launch/scopes-and-launch-context.html
    pub patient: Option<String>,
    pub encounter: Option<String>,
    #[serde(rename = "fhirUser")]
    pub fhir_user: Option<String>,
}
