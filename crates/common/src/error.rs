//! Error types shared across crates.

use std::path::PathBuf;

use thiserror::Error;

use crate::role::{Role, TAG_SIZE};

/// Errors raised where externally sourced key material enters the system.
#[derive(Debug, Error)]
pub enum MaterialError {
    /// The buffer does not have the exact width of its role. Carries the
    /// observed length so a malformed file can be diagnosed.
    #[error("aes256: invalid {role} size {len}")]
    SizeMismatch { role: Role, len: usize },

    /// The material file could not be read.
    #[error("failed to read {role} file {}: {source}", path.display())]
    Io {
        role: Role,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MaterialError {
    /// The observed length for a size mismatch, `None` for I/O failures.
    pub fn observed_len(&self) -> Option<usize> {
        match self {
            MaterialError::SizeMismatch { len, .. } => Some(*len),
            MaterialError::Io { .. } => None,
        }
    }

    /// Process exit code for this error (see [`Error::exit_code`]).
    pub fn exit_code(&self) -> i32 {
        match self {
            MaterialError::SizeMismatch { .. } => 65,
            MaterialError::Io { .. } => 74,
        }
    }

    /// Short machine-readable code for error reports.
    pub fn code(&self) -> &'static str {
        match self {
            MaterialError::SizeMismatch { .. } => "size_mismatch",
            MaterialError::Io { .. } => "io_error",
        }
    }
}

/// Errors produced by the stream and AEAD workflows.
#[derive(Debug, Error)]
pub enum CipherError {
    /// GCM tag verification failed. No plaintext is released.
    #[error("message authentication failed")]
    AuthenticationFailure,

    /// A ciphertext-with-tag buffer was not longer than the tag.
    #[error("ciphertext ({len} bytes) <= AES GCM tag size ({TAG_SIZE})")]
    TooShortCiphertext { len: usize },

    /// The AEAD refused to seal (input exceeds the GCM length limit).
    #[error("aead seal failed")]
    SealFailure,

    /// A sealed envelope string does not match `v1.<nonce>.<ciphertext>`.
    #[error("invalid sealed envelope format")]
    InvalidEnvelope,
}

impl CipherError {
    /// Process exit code for this error (see [`Error::exit_code`]).
    pub fn exit_code(&self) -> i32 {
        match self {
            CipherError::AuthenticationFailure => 77,
            CipherError::TooShortCiphertext { .. } | CipherError::InvalidEnvelope => 65,
            CipherError::SealFailure => 70,
        }
    }

    /// Short machine-readable code for error reports.
    pub fn code(&self) -> &'static str {
        match self {
            CipherError::AuthenticationFailure => "auth_failed",
            CipherError::TooShortCiphertext { .. } => "too_short",
            CipherError::SealFailure => "seal_failed",
            CipherError::InvalidEnvelope => "invalid_envelope",
        }
    }
}

/// Top-level error type.
///
/// Variants map to process exit codes returned by the tool
/// (values follow `sysexits.h`):
/// - data errors (wrong size, too short, bad envelope) → 65
/// - seal failure → 70
/// - I/O → 74
/// - authentication failure → 77
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Material(#[from] MaterialError),

    #[error(transparent)]
    Cipher(#[from] CipherError),
}

impl Error {
    /// Returns the process exit code that should be reported for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Material(e) => e.exit_code(),
            Error::Cipher(e) => e.exit_code(),
        }
    }

    /// Short machine-readable code for error reports.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Material(e) => e.code(),
            Error::Cipher(e) => e.code(),
        }
    }
}
