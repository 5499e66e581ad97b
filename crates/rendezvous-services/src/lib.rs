//! rendezvous-services — the peer registry and the tasks that maintain it.

pub mod expiry;
pub mod registry;

pub use expiry::expiry_loop;
pub use registry::{Entry, Registry, RegistryError, DEFAULT_TTL, MAX_TTL};
