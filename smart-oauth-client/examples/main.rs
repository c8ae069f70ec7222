use http::Uri;
use smart_oauth_client::config::{EnvLoader, FileLoader};
use smart_oauth_client::store::session::MemorySessionStore;
use smart_oauth_client::{bundle, CallbackParams, ClientConfig, SmartAuthClient, SmartAuthClientConfig};
use std::io::{stdin, stdout, BufRead, Write};
use tracing_subscriber::EnvFilter;

const SESSION_ID: &str = "terminal";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // SMART_CONFIG=path/to/config.json, optionally overridden by SMART_* variables
    let config = match std::env::var("SMART_CONFIG") {
        Ok(path) => {
            let base = ClientConfig::load(&FileLoader::new(path)).await?;
            ClientConfig::load(&EnvLoader::new().base(base)).await?
        }
        Err(_) => ClientConfig::load(&EnvLoader::new()).await?,
    };
    let client = SmartAuthClient::new(SmartAuthClientConfig {
        client: config,
        session_store: MemorySessionStore::default(),
    })?;

    let request = client.build_authorization_url(SESSION_ID).await?;
    println!("Authorization url: {}", request.url);

    // Open the URL and sign in,
    // then paste the URL like "http://127.0.0.1:5000/callback?code=...&state=..." you were redirected to.
    print!("Redirected url: ");
    stdout().lock().flush()?;
    let mut url = String::new();
    stdin().lock().read_line(&mut url)?;

    let uri = url.trim().parse::<Uri>()?;
    let params: CallbackParams = serde_html_form::from_str(uri.query().unwrap_or_default())?;
    let token_set = client.callback(SESSION_ID, params).await?;
    println!("patient in context: {:?}", token_set.patient_id);

    if token_set.patient_id.is_some() {
        let summary = client.patient_summary(SESSION_ID).await?;
        println!("{}", serde_json::to_string_pretty(&summary)?);

        let documents = client.document_references(SESSION_ID, 100).await?;
        for document in bundle::resources(&documents) {
            println!(
                "DocumentReference/{}",
                document.get("id").and_then(|id| id.as_str()).unwrap_or("?")
            );
        }
    }

    client.clear_session(SESSION_ID).await?;
    Ok(())
}
