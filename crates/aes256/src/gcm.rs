//! AES-256 GCM one-shot sealing and opening.
//!
//! Sealed output is `ciphertext ‖ tag` with the 16-byte tag appended, so its
//! length is always `plaintext.len() + TAG_SIZE`.
//!
//! Both [`seal`] and [`open`] take ownership of the data buffer and work in
//! place: the returned `Vec` reuses the input allocation. Only the returned
//! value is meaningful after the call.
//!
//! **Never reuse a nonce under the same key.** GCM nonce reuse breaks both
//! confidentiality and authentication. Derive per-message nonces with
//! [`crate::counter::inc_nonce`] or [`crate::sequence::nonce_sequence`].

use aes_gcm::{
    aead::{AeadInPlace, KeyInit},
    Aes256Gcm,
};
use common::{CipherError, MaterialError, Role, KEY_SIZE, NONCE_SIZE, TAG_SIZE};
use tracing::warn;
use zeroize::Zeroize;

use crate::size;

/// Create the AES-256 GCM AEAD for `key`.
///
/// # Panics
///
/// Panics if `key` is not [`KEY_SIZE`] bytes.
pub fn new_gcm(key: &[u8]) -> Aes256Gcm {
    let key: &[u8; KEY_SIZE] = size::require(key, Role::Key, "new_gcm");
    Aes256Gcm::new(key.into())
}

/// Encrypt and authenticate `plaintext`, authenticating `aad` as well.
///
/// The plaintext buffer is overwritten with the ciphertext and grows by
/// [`TAG_SIZE`] bytes for the tag.
///
/// # Panics
///
/// Panics if `key` or `nonce` has the wrong width.
///
/// # Errors
///
/// Returns [`CipherError::SealFailure`] if the plaintext exceeds the GCM
/// message length limit. The buffer is wiped in that case.
pub fn seal(
    key: &[u8],
    nonce: &[u8],
    mut plaintext: Vec<u8>,
    aad: &[u8],
) -> Result<Vec<u8>, CipherError> {
    let aead = new_gcm(key);
    let nonce: &[u8; NONCE_SIZE] = size::require(nonce, Role::Nonce, "seal");

    if aead
        .encrypt_in_place(nonce.into(), aad, &mut plaintext)
        .is_err()
    {
        plaintext.zeroize();
        return Err(CipherError::SealFailure);
    }
    Ok(plaintext)
}

/// Verify and decrypt a `ciphertext ‖ tag` buffer.
///
/// # Panics
///
/// Panics if `key` or `nonce` has the wrong width.
///
/// # Errors
///
/// Returns [`CipherError::AuthenticationFailure`] if the tag does not verify
/// (wrong key, nonce, or associated data, or tampered ciphertext). The
/// buffer is wiped before returning, so no unauthenticated bytes escape.
pub fn open(
    key: &[u8],
    nonce: &[u8],
    mut sealed: Vec<u8>,
    aad: &[u8],
) -> Result<Vec<u8>, CipherError> {
    let aead = new_gcm(key);
    let nonce: &[u8; NONCE_SIZE] = size::require(nonce, Role::Nonce, "open");

    if aead.decrypt_in_place(nonce.into(), aad, &mut sealed).is_err() {
        warn!(len = sealed.len(), "GCM authentication failed");
        sealed.zeroize();
        return Err(CipherError::AuthenticationFailure);
    }
    Ok(sealed)
}

/// Alias of [`seal`].
pub fn encrypt_gcm(
    key: &[u8],
    nonce: &[u8],
    plaintext: Vec<u8>,
    aad: &[u8],
) -> Result<Vec<u8>, CipherError> {
    seal(key, nonce, plaintext, aad)
}

/// Alias of [`open`].
pub fn decrypt_gcm(
    key: &[u8],
    nonce: &[u8],
    sealed: Vec<u8>,
    aad: &[u8],
) -> Result<Vec<u8>, CipherError> {
    open(key, nonce, sealed, aad)
}

/// Split a sealed buffer into the ciphertext proper and its trailing tag.
///
/// The input must be strictly longer than [`TAG_SIZE`], so the ciphertext
/// half is never empty.
///
/// # Errors
///
/// Returns [`CipherError::TooShortCiphertext`] for inputs of [`TAG_SIZE`]
/// bytes or fewer.
pub fn split_ciphertext_tag(sealed: &[u8]) -> Result<(&[u8], &[u8; TAG_SIZE]), CipherError> {
    if sealed.len() <= TAG_SIZE {
        return Err(CipherError::TooShortCiphertext { len: sealed.len() });
    }
    sealed
        .split_last_chunk::<TAG_SIZE>()
        .ok_or(CipherError::TooShortCiphertext { len: sealed.len() })
}

/// Re-attach a detached tag to its ciphertext.
///
/// # Errors
///
/// Returns [`MaterialError::SizeMismatch`] if `tag` is not [`TAG_SIZE`] bytes.
pub fn join_ciphertext_tag(ciphertext: &[u8], tag: &[u8]) -> Result<Vec<u8>, MaterialError> {
    size::validate_tag(tag)?;
    let mut sealed = Vec::with_capacity(ciphertext.len() + TAG_SIZE);
    sealed.extend_from_slice(ciphertext);
    sealed.extend_from_slice(tag);
    Ok(sealed)
}
