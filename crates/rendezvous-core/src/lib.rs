//! rendezvous-core — shared configuration and identifiers.
//! All other rendezvous crates depend on this one.

pub mod config;
pub mod session;

pub use config::{ConfigError, RendezvousConfig};
pub use session::{generate_session_id, SESSION_ID_LEN};
