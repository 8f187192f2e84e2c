//! [`Key`]: owned AES-256 key bytes, wiped on drop.

use std::path::Path;

use common::{MaterialError, Role, KEY_SIZE};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::{fill_random, load_from_file};

/// Fixed-size key buffer that holds exactly [`KEY_SIZE`] bytes.
///
/// The bytes live on the heap and are overwritten with zeroes when the key
/// is dropped. `Debug` never prints them.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Key(Box<[u8; KEY_SIZE]>);

impl Key {
    /// Move the key out of `bytes`, leaving the caller's buffer zeroed.
    pub fn from_bytes(bytes: &mut [u8; KEY_SIZE]) -> Self {
        let key = Self(Box::new(*bytes));
        bytes.zeroize();
        key
    }

    /// Copy a key out of an externally supplied slice.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::SizeMismatch`] if `bytes` is not [`KEY_SIZE`] long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, MaterialError> {
        crate::size::validate(bytes, Role::Key)?;
        let mut buf = Box::new([0u8; KEY_SIZE]);
        buf.copy_from_slice(bytes);
        Ok(Self(buf))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        &self.0[..]
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Key([REDACTED])")
    }
}

/// Generate a random AES-256 key from the OS CSPRNG.
///
/// # Panics
///
/// Panics if the OS random source is unavailable.
pub fn new_random_key() -> Key {
    let mut buf = Box::new([0u8; KEY_SIZE]);
    fill_random(&mut buf[..], Role::Key);
    Key(buf)
}

/// Read an AES-256 key from a file holding exactly [`KEY_SIZE`] bytes.
///
/// # Errors
///
/// Returns [`MaterialError::Io`] if the file cannot be read, or
/// [`MaterialError::SizeMismatch`] carrying the file length otherwise.
pub fn read_key_file(path: impl AsRef<Path>) -> Result<Key, MaterialError> {
    let bytes = Zeroizing::new(load_from_file(path, Role::Key)?);
    Key::from_slice(&bytes)
}
