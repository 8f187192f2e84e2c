//! Command-line definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use common::Role;

#[derive(Parser, Debug)]
#[command(name = "aes256", version)]
#[command(about = "AES-256 key material, CTR and GCM one-shot encryption")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a random key, IV, or nonce (or a zero IV/nonce)
    Gen {
        #[arg(value_enum)]
        kind: MaterialKind,

        /// Produce an all-zero IV or nonce instead of a random one
        #[arg(long)]
        zero: bool,

        /// Write the raw bytes to this file (required for keys)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Add a signed delta to an IV or nonce file, wrapping at its width
    Step {
        #[arg(value_enum)]
        kind: CounterKind,

        /// File holding the raw IV or nonce
        #[arg(short, long)]
        file: PathBuf,

        /// Amount to add; negative values count down
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        delta: i64,

        /// Write the result back to the file
        #[arg(long)]
        write: bool,
    },

    /// AES-256 CTR transform (encryption and decryption are the same)
    Ctr {
        /// Key file (32 bytes)
        #[arg(long)]
        key: PathBuf,

        /// IV file (16 bytes)
        #[arg(long)]
        iv: PathBuf,

        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },

    /// AES-256 GCM seal; prints a v1 sealed envelope
    Seal {
        /// Key file (32 bytes)
        #[arg(long)]
        key: PathBuf,

        /// Nonce file (12 bytes)
        #[arg(long)]
        nonce: PathBuf,

        /// Associated data, authenticated but not encrypted
        #[arg(long)]
        aad: Option<String>,

        /// Plaintext file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// AES-256 GCM open of a v1 sealed envelope
    Open {
        /// Key file (32 bytes)
        #[arg(long)]
        key: PathBuf,

        /// Associated data given when sealing
        #[arg(long)]
        aad: Option<String>,

        /// File holding the envelope text
        #[arg(short, long)]
        input: PathBuf,

        /// Plaintext destination
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Split a raw GCM ciphertext into ciphertext and tag
    Split {
        /// File holding ciphertext followed by its 16-byte tag
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaterialKind {
    Key,
    Iv,
    Nonce,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterKind {
    Iv,
    Nonce,
}

impl From<MaterialKind> for Role {
    fn from(kind: MaterialKind) -> Self {
        match kind {
            MaterialKind::Key => Role::Key,
            MaterialKind::Iv => Role::Iv,
            MaterialKind::Nonce => Role::Nonce,
        }
    }
}

impl From<CounterKind> for Role {
    fn from(kind: CounterKind) -> Self {
        match kind {
            CounterKind::Iv => Role::Iv,
            CounterKind::Nonce => Role::Nonce,
        }
    }
}
