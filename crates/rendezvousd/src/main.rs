//! rendezvousd — peer rendezvous server.

use anyhow::{Context, Result};

use rendezvous_api::ApiState;
use rendezvous_core::RendezvousConfig;
use rendezvous_services::{expiry_loop, Registry};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load config
    if let Err(e) = RendezvousConfig::write_default_if_missing() {
        tracing::warn!(error = %e, "failed to write default config");
    }
    let config = RendezvousConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to load config, using defaults");
        RendezvousConfig::default()
    });

    let registry = Registry::from_config(&config.registry);
    tracing::info!(
        ttl_secs = config.registry.ttl_secs,
        sweep_interval_secs = config.registry.sweep_interval_secs,
        "peer registry ready"
    );

    // ── Shutdown channel ─────────────────────────────────────────────────────
    let (shutdown_tx, _) = tokio::sync::broadcast::channel::<()>(1);

    {
        let shutdown = shutdown_tx.clone();
        tokio::spawn(async move {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("shutdown signal received");
            let _ = shutdown.send(());
        });
    }

    // ── Spawn tasks ──────────────────────────────────────────────────────────

    let _expiry_task = config
        .registry
        .sweep_interval()
        .map(|every| tokio::spawn(expiry_loop(registry.clone(), every)));

    let bind = format!("{}:{}", config.network.bind_addr, config.network.port);
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;

    let mut shutdown_rx = shutdown_tx.subscribe();
    let shutdown = async move {
        let _ = shutdown_rx.recv().await;
    };

    rendezvous_api::serve(ApiState::new(registry), listener, shutdown).await?;

    tracing::info!("shutting down");
    Ok(())
}
