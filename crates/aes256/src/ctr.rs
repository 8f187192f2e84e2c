//! AES-256 CTR mode.
//!
//! The whole 16-byte IV is the initial counter block and the counter
//! increments as a 128-bit big-endian integer, so consecutive messages can
//! use IVs derived with [`crate::counter::add_iv`].
//!
//! SECURITY NOTE: CTR provides no authentication. Use [`crate::gcm`] when the
//! ciphertext can be tampered with.

use aes::Aes256;
use common::{Role, IV_SIZE, KEY_SIZE};
use ctr::cipher::{KeyIvInit, StreamCipher};

use crate::size;

/// AES-256 with a 128-bit big-endian counter.
pub type Aes256Ctr = ctr::Ctr128BE<Aes256>;

/// Create a keystream for `key` starting at counter block `iv`.
///
/// # Panics
///
/// Panics if `key` is not [`KEY_SIZE`] or `iv` not [`IV_SIZE`] bytes.
pub fn new_ctr(key: &[u8], iv: &[u8]) -> Aes256Ctr {
    let key: &[u8; KEY_SIZE] = size::require(key, Role::Key, "new_ctr");
    let iv: &[u8; IV_SIZE] = size::require(iv, Role::Iv, "new_ctr");
    Aes256Ctr::new(key.into(), iv.into())
}

/// One-shot CTR transform of `data` in place. Returns `data` for chaining.
///
/// Encryption and decryption are the same operation.
pub fn do_ctr<'a>(key: &[u8], iv: &[u8], data: &'a mut [u8]) -> &'a mut [u8] {
    new_ctr(key, iv).apply_keystream(data);
    data
}

/// Encrypt `data` in place and hand the buffer back as ciphertext.
pub fn encrypt_ctr(key: &[u8], iv: &[u8], mut data: Vec<u8>) -> Vec<u8> {
    do_ctr(key, iv, &mut data);
    data
}

/// Decrypt `data` in place and hand the buffer back as plaintext.
pub fn decrypt_ctr(key: &[u8], iv: &[u8], mut data: Vec<u8>) -> Vec<u8> {
    do_ctr(key, iv, &mut data);
    data
}
