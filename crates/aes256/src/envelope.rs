//! Text form of a GCM-sealed message that carries its own nonce.
//!
//! ```text
//! v1.<base64url-no-pad(nonce)>.<base64url-no-pad(ciphertext+tag)>
//! ```
//!
//! The `v1` prefix leaves room for a later algorithm or layout change without
//! breaking stored envelopes.

use std::{fmt, str::FromStr};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use common::{CipherError, TAG_SIZE};

use crate::gcm;
use crate::material::Nonce;

/// Prefix that appears at the start of every envelope.
pub const VERSION_PREFIX: &str = "v1";

/// A parsed sealed envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedEnvelope {
    /// Nonce the message was sealed under.
    pub nonce: Nonce,
    /// Ciphertext with the authentication tag appended.
    pub sealed: Vec<u8>,
}

impl fmt::Display for SealedEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}",
            VERSION_PREFIX,
            URL_SAFE_NO_PAD.encode(self.nonce),
            URL_SAFE_NO_PAD.encode(&self.sealed),
        )
    }
}

impl FromStr for SealedEnvelope {
    type Err = CipherError;

    /// Parse an envelope string.
    ///
    /// An empty plaintext seals to a bare tag, so a body of exactly
    /// [`TAG_SIZE`] bytes is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().splitn(3, '.').collect();
        if parts.len() != 3 || parts[0] != VERSION_PREFIX {
            return Err(CipherError::InvalidEnvelope);
        }

        let nonce_bytes = URL_SAFE_NO_PAD
            .decode(parts[1])
            .map_err(|_| CipherError::InvalidEnvelope)?;
        let nonce: Nonce = nonce_bytes
            .as_slice()
            .try_into()
            .map_err(|_| CipherError::InvalidEnvelope)?;

        let sealed = URL_SAFE_NO_PAD
            .decode(parts[2])
            .map_err(|_| CipherError::InvalidEnvelope)?;
        if sealed.len() < TAG_SIZE {
            return Err(CipherError::InvalidEnvelope);
        }

        Ok(Self { nonce, sealed })
    }
}

/// Seal `plaintext` under `nonce` and package the result with its nonce.
///
/// # Errors
///
/// Same as [`gcm::seal`].
pub fn seal_envelope(
    key: &[u8],
    nonce: &Nonce,
    plaintext: Vec<u8>,
    aad: &[u8],
) -> Result<SealedEnvelope, CipherError> {
    let sealed = gcm::seal(key, nonce, plaintext, aad)?;
    Ok(SealedEnvelope {
        nonce: *nonce,
        sealed,
    })
}

/// Verify and decrypt an envelope.
///
/// # Errors
///
/// Returns [`CipherError::AuthenticationFailure`] if the tag does not verify.
pub fn open_envelope(
    key: &[u8],
    envelope: SealedEnvelope,
    aad: &[u8],
) -> Result<Vec<u8>, CipherError> {
    gcm::open(key, &envelope.nonce, envelope.sealed, aad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{new_random_key, new_random_nonce};
    use common::NONCE_SIZE;

    #[test]
    fn seal_open_round_trip() {
        let key = new_random_key();
        let nonce = new_random_nonce();
        let env = seal_envelope(key.as_ref(), &nonce, b"123-45-6789".to_vec(), b"").unwrap();
        let opened = open_envelope(key.as_ref(), env, b"").unwrap();
        assert_eq!(opened, b"123-45-6789");
    }

    #[test]
    fn string_repr_round_trip() {
        let key = new_random_key();
        let env = seal_envelope(key.as_ref(), &new_random_nonce(), b"hello".to_vec(), b"").unwrap();
        let s = env.to_string();
        assert!(s.starts_with("v1."));
        let parsed: SealedEnvelope = s.parse().unwrap();
        assert_eq!(parsed, env);
    }

    #[test]
    fn empty_plaintext_round_trips_through_text() {
        let key = new_random_key();
        let env = seal_envelope(key.as_ref(), &new_random_nonce(), Vec::new(), b"").unwrap();
        let parsed: SealedEnvelope = env.to_string().parse().unwrap();
        assert!(open_envelope(key.as_ref(), parsed, b"").unwrap().is_empty());
    }

    #[test]
    fn wrong_key_fails() {
        let env = seal_envelope(
            new_random_key().as_ref(),
            &new_random_nonce(),
            b"secret".to_vec(),
            b"",
        )
        .unwrap();
        assert!(matches!(
            open_envelope(new_random_key().as_ref(), env, b""),
            Err(CipherError::AuthenticationFailure)
        ));
    }

    #[test]
    fn rejects_bad_prefix() {
        assert!("v2.AAAAAAAAAAAAAAAA.AAAAAAAAAAAAAAAAAAAAAA"
            .parse::<SealedEnvelope>()
            .is_err());
    }

    #[test]
    fn rejects_too_few_parts() {
        assert!("v1.abc".parse::<SealedEnvelope>().is_err());
    }

    #[test]
    fn rejects_bad_base64() {
        assert!("v1.!!!.abc".parse::<SealedEnvelope>().is_err());
    }

    #[test]
    fn rejects_wrong_nonce_length() {
        // 8-byte nonce
        let s = format!(
            "v1.{}.{}",
            URL_SAFE_NO_PAD.encode([0u8; 8]),
            URL_SAFE_NO_PAD.encode([0u8; 20])
        );
        assert!(s.parse::<SealedEnvelope>().is_err());
    }

    #[test]
    fn rejects_body_shorter_than_tag() {
        let s = format!(
            "v1.{}.{}",
            URL_SAFE_NO_PAD.encode([0u8; NONCE_SIZE]),
            URL_SAFE_NO_PAD.encode([0u8; TAG_SIZE - 1])
        );
        assert!(matches!(
            s.parse::<SealedEnvelope>(),
            Err(CipherError::InvalidEnvelope)
        ));
    }

    #[test]
    fn tampered_body_fails_auth() {
        let key = new_random_key();
        let mut env =
            seal_envelope(key.as_ref(), &new_random_nonce(), b"tamper me".to_vec(), b"").unwrap();
        env.sealed[0] ^= 0xFF;
        assert!(open_envelope(key.as_ref(), env, b"").is_err());
    }
}
