//! Peer registry — session id → address, each entry with its own deadline.
//!
//! Entries live in a single ordered list behind one mutex. The list order is
//! first-registration order and is the order peers are listed in. Liveness is
//! derived on every read from the entry's deadline, so an expired entry is
//! never served even if no sweep has reclaimed it yet.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::time::Instant;

use rendezvous_core::config::{RegistryConfig, DEFAULT_TTL_SECS, MAX_TTL_SECS};

/// Lifetime of a registration when none is configured.
pub const DEFAULT_TTL: Duration = Duration::from_secs(DEFAULT_TTL_SECS);

/// Longer TTLs are capped to this.
pub const MAX_TTL: Duration = Duration::from_secs(MAX_TTL_SECS);

/// A registrant's address record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub session_id: String,
    pub address: String,
    /// Time of the most recent registration.
    pub registered_at: Instant,
    /// `registered_at + ttl`. The entry is gone once `now > expires_at`.
    pub expires_at: Instant,
}

impl Entry {
    pub fn is_expired(&self, now: Instant) -> bool {
        now > self.expires_at
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Caller supplied an empty session id or address.
    #[error("require address,sessionId")]
    Validation,
    /// The entry store can no longer be read or written.
    #[error("registry storage unavailable: {0}")]
    Storage(String),
}

/// The peer registry — shared between all request handlers.
///
/// Cloning is cheap and every clone refers to the same entries.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: Arc<Mutex<Vec<Entry>>>,
    ttl: Duration,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        if ttl > MAX_TTL {
            tracing::warn!(
                requested_secs = ttl.as_secs(),
                max_secs = MAX_TTL.as_secs(),
                "registry TTL capped"
            );
        }
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            ttl: ttl.min(MAX_TTL),
        }
    }

    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::with_ttl(config.ttl())
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Register `address` under `session_id`, or refresh an existing entry.
    ///
    /// A live entry keeps its position and gets the new address and a fresh
    /// deadline. Anything else counts as a new session: expired entries are
    /// swept first and the new entry goes to the end of the list.
    pub fn register(&self, session_id: &str, address: &str) -> Result<(), RegistryError> {
        if session_id.is_empty() || address.is_empty() {
            return Err(RegistryError::Validation);
        }

        let now = Instant::now();
        let entry = Entry {
            session_id: session_id.to_string(),
            address: address.to_string(),
            registered_at: now,
            expires_at: now + self.ttl,
        };

        let mut entries = self.lock()?;

        if let Some(existing) = entries
            .iter_mut()
            .find(|e| e.session_id == session_id && !e.is_expired(now))
        {
            *existing = entry;
            tracing::info!(session_id, address, "peer refreshed");
            return Ok(());
        }

        let removed = sweep_expired(&mut entries, now);
        entries.push(entry);
        tracing::info!(session_id, address, swept = removed, "peer registered");
        Ok(())
    }

    /// Addresses of all live entries, in registration order.
    pub fn list_peers(&self) -> Result<Vec<String>, RegistryError> {
        let now = Instant::now();
        let entries = self.lock()?;
        let peers: Vec<String> = entries
            .iter()
            .filter(|e| !e.is_expired(now))
            .map(|e| e.address.clone())
            .collect();
        tracing::debug!(count = peers.len(), stored = entries.len(), "listed peers");
        Ok(peers)
    }

    /// Look up the live entry for a session, if any.
    pub fn get(&self, session_id: &str) -> Result<Option<Entry>, RegistryError> {
        let now = Instant::now();
        Ok(self
            .lock()?
            .iter()
            .find(|e| e.session_id == session_id && !e.is_expired(now))
            .cloned())
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn sweep(&self) -> Result<usize, RegistryError> {
        let mut entries = self.lock()?;
        Ok(sweep_expired(&mut entries, Instant::now()))
    }

    /// Entries currently held, including expired ones not yet swept.
    pub fn tracked_count(&self) -> Result<usize, RegistryError> {
        Ok(self.lock()?.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Entry>>, RegistryError> {
        self.entries.lock().map_err(|e| {
            tracing::error!(error = %e, "peer registry lock poisoned");
            RegistryError::Storage(e.to_string())
        })
    }
}

fn sweep_expired(entries: &mut Vec<Entry>, now: Instant) -> usize {
    let before = entries.len();
    entries.retain(|e| !e.is_expired(now));
    let removed = before - entries.len();
    if removed > 0 {
        tracing::debug!(removed, "swept expired peer registry entries");
    }
    removed
}
