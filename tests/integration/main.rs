//! Rendezvous integration test harness.
//!
//! Each test starts its own server on an ephemeral loopback port with a
//! fresh registry and talks to it over real HTTP. The server stops when the
//! returned `TestServer` is dropped.

mod concurrency;
mod peers;

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::sync::oneshot;

use rendezvous_api::ApiState;
use rendezvous_services::Registry;

// ── Harness ───────────────────────────────────────────────────────────────────

pub struct TestServer {
    pub addr: SocketAddr,
    pub registry: Registry,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Start a server whose registry uses `ttl`.
pub async fn spawn_server(ttl: Duration) -> Result<TestServer> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind test listener")?;
    let addr = listener.local_addr()?;
    let registry = Registry::with_ttl(ttl);
    let (tx, rx) = oneshot::channel::<()>();

    let state = ApiState::new(registry.clone());
    tokio::spawn(async move {
        let shutdown = async move {
            let _ = rx.await;
        };
        if let Err(e) = rendezvous_api::serve(state, listener, shutdown).await {
            eprintln!("test server failed: {e}");
        }
    });

    Ok(TestServer {
        addr,
        registry,
        shutdown: Some(tx),
    })
}

/// POST a registration. Returns the status code and decoded body.
pub async fn register(server: &TestServer, address: &str, session_id: &str) -> Result<(u16, Value)> {
    let body = serde_json::json!({ "address": address, "sessionId": session_id });
    post(server, &body).await
}

pub async fn post(server: &TestServer, body: &Value) -> Result<(u16, Value)> {
    let resp = reqwest::Client::new()
        .post(server.url())
        .json(body)
        .send()
        .await
        .context("POST / failed")?;
    let status = resp.status().as_u16();
    Ok((status, resp.json().await.context("POST / returned non-JSON")?))
}

/// GET the peer list as plain strings.
pub async fn peers(server: &TestServer) -> Result<Vec<String>> {
    let resp = reqwest::get(server.url()).await.context("GET / failed")?;
    anyhow::ensure!(resp.status().is_success(), "GET / returned {}", resp.status());
    let body: Value = resp.json().await.context("GET / returned non-JSON")?;
    let peers = body["peers"]
        .as_array()
        .context("missing peers array")?
        .iter()
        .map(|p| p.as_str().map(str::to_string).context("peer is not a string"))
        .collect::<Result<Vec<_>>>()?;
    Ok(peers)
}
