//! Key, IV, and nonce sources: OS randomness, zero values, and files.
//!
//! # Randomness
//!
//! All random material comes from the OS CSPRNG. If the OS cannot supply
//! entropy the generator panics: no caller can safely continue without key
//! material, so there is no error value to ignore.
//!
//! # Files
//!
//! A material file holds the raw bytes and nothing else. [`load_from_file`]
//! rejects a file whose length differs from the role's width, reporting the
//! observed length.

pub mod iv;
pub mod key;
pub mod nonce;

pub use iv::{new_random_iv, new_zero_iv, read_iv_file, Iv};
pub use key::{new_random_key, read_key_file, Key};
pub use nonce::{new_random_nonce, new_zero_nonce, read_nonce_file, Nonce};

use std::path::Path;

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use common::{MaterialError, Role};
use tracing::debug;

use crate::size;

/// Fill `buf` from the OS CSPRNG, panicking if no entropy is available.
pub(crate) fn fill_random(buf: &mut [u8], role: Role) {
    if let Err(e) = OsRng.try_fill_bytes(buf) {
        panic!("aes256: cannot generate {role}: OS random source unavailable: {e}");
    }
}

/// Read a material file and check it holds exactly `role.width()` bytes.
///
/// # Errors
///
/// Returns [`MaterialError::Io`] if the file cannot be read, or
/// [`MaterialError::SizeMismatch`] carrying the file's actual length.
pub fn load_from_file(path: impl AsRef<Path>, role: Role) -> Result<Vec<u8>, MaterialError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| MaterialError::Io {
        role,
        path: path.to_path_buf(),
        source,
    })?;
    size::validate(&bytes, role)?;
    debug!(role = %role, path = %path.display(), "material loaded");
    Ok(bytes)
}

/// [`load_from_file`] into a fixed-width array.
pub(crate) fn load_fixed<const N: usize>(
    path: impl AsRef<Path>,
    role: Role,
) -> Result<[u8; N], MaterialError> {
    let bytes = load_from_file(path, role)?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| MaterialError::SizeMismatch {
            role,
            len: bytes.len(),
        })
}
