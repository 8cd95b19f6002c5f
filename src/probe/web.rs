//! HTTP probe via HEAD requests.

use reqwest::Client;

/// True if the URL answered the HEAD request at all.
///
/// Any response counts as alive; in the event the connection was made but
/// nothing came back, the empty header map fails the sanity check.
pub async fn website_alive(client: &Client, url: &str) -> bool {
    match client.head(url).send().await {
        Ok(response) => !response.headers().is_empty(),
        Err(e) => {
            tracing::debug!(url = %url, error = %e, "Web HEAD query failed");
            false
        }
    }
}
