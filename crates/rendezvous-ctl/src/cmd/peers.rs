//! Peer listing command.

use anyhow::Result;
use serde::Deserialize;

use super::http::get_json;

#[derive(Deserialize)]
struct PeersResponse {
    peers: Vec<String>,
}

/// Live peer addresses in registration order.
pub async fn fetch_peers(url: &str) -> Result<Vec<String>> {
    let resp: PeersResponse = get_json(url).await?;
    Ok(resp.peers)
}

pub async fn cmd_peers(url: &str) -> Result<()> {
    let peers = fetch_peers(url).await?;

    if peers.is_empty() {
        println!("No live peers registered.");
        return Ok(());
    }

    println!("═══════════════════════════════════════");
    println!("  Live Peers ({})", peers.len());
    println!("═══════════════════════════════════════");
    for addr in &peers {
        println!("  {}", addr);
    }

    Ok(())
}
