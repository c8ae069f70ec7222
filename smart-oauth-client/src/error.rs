use http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] crate::config::Error),
    #[error("callback `state` does not match the issued authorization state")]
    StateMismatch,
    #[error("callback is missing the authorization `code`")]
    MissingCode,
    #[error("authorization denied: {error}")]
    AuthorizationDenied { error: String, description: Option<String> },
    #[error("token exchange failed with status {status}: {body}")]
    TokenExchangeFailed { status: StatusCode, body: String },
    #[error("no authenticated session")]
    Unauthenticated,
    #[error("no patient in the launch context")]
    MissingPatientContext,
    #[error("fhir request failed with status {status}: {body}")]
    FhirRequestFailed { status: StatusCode, body: String },
    #[error("url is outside the fhir server's origin: {0}")]
    ForeignOrigin(String),
    #[error(transparent)]
    Http(#[from] http::Error),
    #[error("http client error: {0}")]
    HttpClient(Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error("session store error: {0}")]
    SessionStore(Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error(transparent)]
    SerdeHtmlForm(#[from] serde_html_form::ser::Error),
}

impl Error {
    /// The upstream HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::TokenExchangeFailed { status, .. } | Self::FhirRequestFailed { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
    /// The upstream response body carried by this error, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::TokenExchangeFailed { body, .. } | Self::FhirRequestFailed { body, .. } => {
                Some(body)
            }
            _ => None,
        }
    }
    /// Whether the caller should send the user back through the login flow.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            Self::StateMismatch
                | Self::MissingCode
                | Self::AuthorizationDenied { .. }
                | Self::Unauthenticated
        )
    }
}

pub type Result<T> = core::result::Result<T, Error>;
