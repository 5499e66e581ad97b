//! Session identifiers — the key a client registers its address under.

use rand::Rng;

/// Length of generated session ids.
pub const SESSION_ID_LEN: usize = 24;

const ALPHABET: &[u8] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-+=!@#$%^&*()_";

/// Generate a random session id of `len` characters.
///
/// Uses the thread-local CSPRNG; ids are opaque to the registry, which
/// only requires them to be non-empty.
pub fn generate_session_id(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}
