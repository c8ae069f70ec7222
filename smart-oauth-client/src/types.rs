mod request;
mod response;
mod token;

pub use request::{
    AuthorizationRequestParameters, AuthorizationResponseType, TokenGrantType,
    TokenRequestParameters,
};
pub use response::OAuthTokenResponse;
use serde::{Deserialize, Serialize};
pub use token::TokenSet;

/// A pending authorization attempt.
///
/// `state` is single use: it is consumed by the matching [`callback`](crate::SmartAuthClient::callback).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    pub state: String,
    pub url: String,
}

/// Query parameters of the redirect back to `redirect_uri`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    // https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.2.1
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Patient demographics together with recent vital signs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientSummary {
    pub patient: serde_json::Value,
    pub observations: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_params_from_query() -> Result<(), serde_html_form::de::Error> {
        let params = serde_html_form::from_str::<CallbackParams>("code=abc&state=xyz")?;
        assert_eq!(params.code.as_deref(), Some("abc"));
        assert_eq!(params.state.as_deref(), Some("xyz"));
        assert_eq!(params.error, None);

        let params = serde_html_form::from_str::<CallbackParams>(
            "error=access_denied&error_description=User+denied&state=xyz",
        )?;
        assert_eq!(params.code, None);
        assert_eq!(params.error.as_deref(), Some("access_denied"));
        assert_eq!(params.error_description.as_deref(), Some("User denied"));
        Ok(())
    }
}
