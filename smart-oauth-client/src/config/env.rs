use super::{ClientConfig, Error, Loader};

/// Default prefix of the environment variables read by [`EnvLoader`].
pub const DEFAULT_PREFIX: &str = "SMART_";

/// An implementation of [`Loader`] that reads settings from environment variables.
///
/// Each setting is read from `{prefix}{NAME}`, e.g. `SMART_CLIENT_ID`. Variables that are set
/// override the corresponding field of the base configuration, if one was given.
pub struct EnvLoader {
    prefix: String,
    base: Option<ClientConfig>,
}

impl EnvLoader {
    pub fn new() -> Self {
        Self { prefix: String::from(DEFAULT_PREFIX), base: None }
    }
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
    /// Use `base` for every setting not present in the environment.
    pub fn base(mut self, base: ClientConfig) -> Self {
        self.base = Some(base);
        self
    }
    fn resolve(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<ClientConfig, Error> {
        let var = |name: &str| lookup(&format!("{}{name}", self.prefix));
        let base = self.base.as_ref();
        let required = |name: &str, field: &'static str, fallback: Option<&String>| {
            var(name).or_else(|| fallback.cloned()).ok_or(Error::Missing(field))
        };
        Ok(ClientConfig {
            client_id: required("CLIENT_ID", "client_id", base.map(|b| &b.client_id))?,
            client_secret: var("CLIENT_SECRET").or_else(|| base.and_then(|b| b.client_secret.clone())),
            redirect_uri: required("REDIRECT_URI", "redirect_uri", base.map(|b| &b.redirect_uri))?,
            scope: required("SCOPE", "scope", base.map(|b| &b.scope))?,
            authorize_endpoint: required(
                "AUTHORIZE_ENDPOINT",
                "authorize_endpoint",
                base.map(|b| &b.authorize_endpoint),
            )?,
            token_endpoint: required(
                "TOKEN_ENDPOINT",
                "token_endpoint",
                base.map(|b| &b.token_endpoint),
            )?,
            fhir_base_url: required(
                "FHIR_BASE_URL",
                "fhir_base_url",
                base.map(|b| &b.fhir_base_url),
            )?,
        })
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader for EnvLoader {
    async fn load(
        &self,
    ) -> core::result::Result<ClientConfig, Box<dyn std::error::Error + Send + Sync + 'static>>
    {
        Ok(self.resolve(|key| std::env::var(key).ok())?)
    }
}
