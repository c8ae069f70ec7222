use super::HttpClient;
use http::{Request, Response};
use reqwest::Client;

/// [`HttpClient`] backed by [`reqwest`].
#[derive(Clone, Default)]
pub struct DefaultHttpClient {
    client: Client,
}

impl DefaultHttpClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl HttpClient for DefaultHttpClient {
    async fn send_http(
        &self,
        request: Request<Vec<u8>>,
    ) -> core::result::Result<Response<Vec<u8>>, Box<dyn std::error::Error + Send + Sync + 'static>>
    {
        let response = self.client.execute(request.try_into()?).await?;
        let mut builder = Response::builder().status(response.status());
        for (k, v) in response.headers() {
            builder = builder.header(k, v);
        }
        builder.body(response.bytes().await?.to_vec()).map_err(Into::into)
    }
}
