//! AES IV generation and loading.

use std::path::Path;

use common::{MaterialError, Role, IV_SIZE};

use super::{fill_random, load_fixed};

/// A 16-byte AES IV, treated as a big-endian 128-bit counter.
pub type Iv = [u8; IV_SIZE];

/// Generate a random IV from the OS CSPRNG.
///
/// # Panics
///
/// Panics if the OS random source is unavailable.
pub fn new_random_iv() -> Iv {
    let mut iv = [0u8; IV_SIZE];
    fill_random(&mut iv, Role::Iv);
    iv
}

/// The all-zero IV. Useful as a deterministic counter base, never as a
/// secret.
pub fn new_zero_iv() -> Iv {
    [0u8; IV_SIZE]
}

/// Read an IV from a file holding exactly [`IV_SIZE`] bytes.
///
/// # Errors
///
/// Returns [`MaterialError::Io`] if the file cannot be read, or
/// [`MaterialError::SizeMismatch`] carrying the file length otherwise.
pub fn read_iv_file(path: impl AsRef<Path>) -> Result<Iv, MaterialError> {
    load_fixed(path, Role::Iv)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_iv_is_zero() {
        assert_eq!(new_zero_iv(), [0u8; IV_SIZE]);
    }

    #[test]
    fn random_ivs_differ() {
        assert_ne!(new_random_iv(), new_random_iv());
    }

    #[test]
    fn read_iv_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iv.bin");
        let iv = new_random_iv();
        std::fs::write(&path, iv).unwrap();
        assert_eq!(read_iv_file(&path).unwrap(), iv);
    }

    #[test]
    fn read_iv_file_rejects_nonce_sized_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iv.bin");
        std::fs::write(&path, [0u8; 12]).unwrap();
        let err = read_iv_file(&path).unwrap_err();
        assert_eq!(err.to_string(), "aes256: invalid IV size 12");
    }
}
