//! Common sizes, roles, report types, and errors shared across the `aes256` crates.

pub mod error;
pub mod protocol;
pub mod role;

pub use error::{CipherError, Error, MaterialError};
pub use role::{Role, IV_SIZE, KEY_SIZE, NONCE_SIZE, TAG_SIZE};
