//! Registration command, one-shot or as a keepalive loop.

use std::future::Future;
use std::time::Duration;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use super::http::post_json_body;
use super::peers::fetch_peers;

/// Re-registration period for `--keepalive`. Well inside the server's 25 s TTL.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest<'a> {
    address: &'a str,
    session_id: &'a str,
}

#[derive(Deserialize)]
struct RegisterResponse {
    status: String,
}

async fn register_once(url: &str, address: &str, session_id: &str) -> Result<()> {
    let resp: RegisterResponse = post_json_body(
        url,
        &RegisterRequest {
            address,
            session_id,
        },
    )
    .await?;

    if resp.status != "ok" {
        bail!("unexpected registry status: {}", resp.status);
    }
    Ok(())
}

pub async fn cmd_register(url: &str, address: &str, session_id: &str) -> Result<()> {
    register_once(url, address, session_id).await?;

    println!("✓ Registered {} as {}", address, session_id);
    println!("  Re-register within the registry TTL to stay listed (see --keepalive).");
    Ok(())
}

/// Register every `every` and print the live peers after each registration,
/// until Ctrl-C.
pub async fn cmd_keepalive(
    url: &str,
    address: &str,
    session_id: &str,
    every: Duration,
) -> Result<()> {
    println!(
        "Keeping {} registered as {} every {}s (Ctrl-C to stop)",
        address,
        session_id,
        every.as_secs()
    );
    keepalive(url, address, session_id, every, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

/// Keepalive loop until `shutdown` resolves. A failed tick is reported and
/// the loop carries on, so a registry restart is ridden out.
pub async fn keepalive(
    url: &str,
    address: &str,
    session_id: &str,
    every: Duration,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                println!("Stopped keepalive for {}", session_id);
                return Ok(());
            }
            _ = ticker.tick() => {
                if let Err(e) = register_once(url, address, session_id).await {
                    eprintln!("register failed: {:#}", e);
                    continue;
                }
                match fetch_peers(url).await {
                    Ok(peers) => println!("[{}] peers: {}", session_id, peers.join(", ")),
                    Err(e) => eprintln!("peer list failed: {:#}", e),
                }
            }
        }
    }
}
