//! Shared HTTP request helpers for CLI commands.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

pub async fn get_json<T: for<'de> Deserialize<'de>>(url: &str) -> Result<T> {
    let resp = reqwest::get(url)
        .await
        .with_context(|| format!("failed to connect to registry at {} — is it running?", url))?;
    read_json(resp).await
}

pub async fn post_json_body<T, R>(url: &str, body: &T) -> Result<R>
where
    T: Serialize,
    R: for<'de> Deserialize<'de>,
{
    let resp = reqwest::Client::new()
        .post(url)
        .json(body)
        .send()
        .await
        .with_context(|| format!("failed to connect to registry at {} — is it running?", url))?;
    read_json(resp).await
}

/// Decode a success body, or turn the server's `{"error": ..}` into an error.
async fn read_json<R: for<'de> Deserialize<'de>>(resp: reqwest::Response) -> Result<R> {
    let status = resp.status();
    if !status.is_success() {
        let message = match resp.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => "no error detail".to_string(),
        };
        bail!("registry returned {}: {}", status, message);
    }
    resp.json::<R>().await.context("failed to parse response")
}
