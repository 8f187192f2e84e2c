//! AES-256 GCM nonce generation and loading.

use std::path::Path;

use common::{MaterialError, Role, NONCE_SIZE};

use super::{fill_random, load_fixed};

/// A 12-byte GCM nonce, treated as a big-endian 96-bit counter.
pub type Nonce = [u8; NONCE_SIZE];

/// Generate a random nonce from the OS CSPRNG.
///
/// # Panics
///
/// Panics if the OS random source is unavailable.
pub fn new_random_nonce() -> Nonce {
    let mut nonce = [0u8; NONCE_SIZE];
    fill_random(&mut nonce, Role::Nonce);
    nonce
}

/// The all-zero nonce, the usual base of a counting nonce sequence.
pub fn new_zero_nonce() -> Nonce {
    [0u8; NONCE_SIZE]
}

/// Read a nonce from a file holding exactly [`NONCE_SIZE`] bytes.
///
/// # Errors
///
/// Returns [`MaterialError::Io`] if the file cannot be read, or
/// [`MaterialError::SizeMismatch`] carrying the file length otherwise.
pub fn read_nonce_file(path: impl AsRef<Path>) -> Result<Nonce, MaterialError> {
    load_fixed(path, Role::Nonce)
}
