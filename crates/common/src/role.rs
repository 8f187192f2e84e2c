//! Fixed widths of AES-256 key material and the role each buffer plays.

use serde::{Deserialize, Serialize};

/// AES-256 key size in bytes.
pub const KEY_SIZE: usize = 32;

/// AES IV (counter block) size in bytes.
pub const IV_SIZE: usize = 16;

/// AES-256 GCM nonce size in bytes.
pub const NONCE_SIZE: usize = 12;

/// AES-256 GCM authentication tag size in bytes.
pub const TAG_SIZE: usize = 16;

/// The role a fixed-width buffer plays in a cryptographic operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Key,
    Iv,
    Nonce,
    Tag,
}

impl Role {
    /// Exact width in bytes a buffer must have to play this role.
    pub const fn width(self) -> usize {
        match self {
            Role::Key => KEY_SIZE,
            Role::Iv => IV_SIZE,
            Role::Nonce => NONCE_SIZE,
            Role::Tag => TAG_SIZE,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Role::Key => "key",
            Role::Iv => "IV",
            Role::Nonce => "nonce",
            Role::Tag => "tag",
        })
    }
}
