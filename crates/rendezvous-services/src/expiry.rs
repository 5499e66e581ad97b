//! Background reclamation of expired registry entries.
//!
//! Registration already sweeps lazily; this loop only bounds memory when
//! sessions stop arriving. Reads never depend on it.

use std::time::Duration;

use crate::registry::Registry;

/// Sweep the registry every `check_interval`.
///
/// Runs forever — cancel by dropping the task handle.
pub async fn expiry_loop(registry: Registry, check_interval: Duration) {
    let mut interval = tokio::time::interval(check_interval);

    loop {
        interval.tick().await;

        match registry.sweep() {
            Ok(0) => {}
            Ok(removed) => tracing::debug!(removed, "expired peer registry entries"),
            Err(e) => tracing::warn!(error = %e, "registry sweep failed"),
        }
    }
}
