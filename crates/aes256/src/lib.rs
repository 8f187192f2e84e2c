//! AES-256 key material and one-shot CTR / GCM workflows.
//!
//! - [`size`]: width validation for keys, IVs, nonces, and tags.
//! - [`counter`]: wrapping big-endian arithmetic on IVs and nonces.
//! - [`material`]: random, zero, and file-loaded keys, IVs, and nonces.
//! - [`ctr`]: AES-256 CTR encryption and decryption.
//! - [`gcm`]: AES-256 GCM sealing, opening, and ciphertext/tag splitting.
//! - [`sequence`]: iterators over per-message IVs and nonces.
//! - [`envelope`]: `v1.<nonce>.<ciphertext>` text form of a sealed message.
//!
//! # Errors versus panics
//!
//! Bytes arriving from outside (files, envelope strings, detached tags) are
//! checked and rejected with an error value. In-memory operations handed a
//! buffer of the wrong width panic instead, as does key generation when the
//! OS has no entropy.
//!
//! # Example
//!
//! ```
//! use aes256::{counter, gcm, material};
//!
//! let key = material::new_random_key();
//! let mut nonce = material::new_zero_nonce();
//!
//! let sealed = gcm::seal(key.as_ref(), &nonce, b"first".to_vec(), b"").unwrap();
//! assert_eq!(sealed.len(), 5 + aes256::TAG_SIZE);
//!
//! counter::inc_nonce(&mut nonce);
//! let second = gcm::seal(key.as_ref(), &nonce, b"second".to_vec(), b"").unwrap();
//! assert_eq!(gcm::open(key.as_ref(), &nonce, second, b"").unwrap(), b"second");
//! ```

pub mod counter;
pub mod ctr;
pub mod envelope;
pub mod gcm;
pub mod material;
pub mod sequence;
pub mod size;

pub use common::{CipherError, Error, MaterialError, Role, IV_SIZE, KEY_SIZE, NONCE_SIZE, TAG_SIZE};
pub use envelope::SealedEnvelope;
pub use material::{Iv, Key, Nonce};
