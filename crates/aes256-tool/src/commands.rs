//! Command handlers.
//!
//! Each handler returns the line to print on stdout (empty when the command
//! only writes files). Library errors are wrapped in [`common::Error`] before
//! context is attached so `main` can find them in the chain.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;

use aes256::{counter, ctr, envelope, gcm, material, SealedEnvelope};
use anyhow::{Context, Result};
use common::protocol::{MaterialReport, SplitReport};
use common::{Error, Role};
use tracing::info;
use zeroize::Zeroizing;

use crate::cli::{Command, CounterKind, MaterialKind};
use crate::config::Config;

/// Dispatch a parsed command.
pub fn run(command: Command, cfg: &Config) -> Result<String> {
    match command {
        Command::Gen { kind, zero, out } => generate(kind, zero, out.as_deref()),
        Command::Step {
            kind,
            file,
            delta,
            write,
        } => step(kind, &file, delta, write),
        Command::Ctr {
            key,
            iv,
            input,
            output,
        } => ctr_file(&key, &iv, &input, &output, cfg),
        Command::Seal {
            key,
            nonce,
            aad,
            input,
        } => seal(&key, &nonce, aad.as_deref(), &input, cfg),
        Command::Open {
            key,
            aad,
            input,
            output,
        } => open(&key, aad.as_deref(), &input, &output, cfg),
        Command::Split { input } => split(&input, cfg),
    }
}

// ---------------------------------------------------------------------------
// Key material
// ---------------------------------------------------------------------------

fn generate(kind: MaterialKind, zero: bool, out: Option<&Path>) -> Result<String> {
    let role = Role::from(kind);
    let bytes: Zeroizing<Vec<u8>> = Zeroizing::new(match (kind, zero) {
        (MaterialKind::Key, true) => anyhow::bail!("refusing to generate an all-zero key"),
        (MaterialKind::Key, false) => material::new_random_key().as_bytes().to_vec(),
        (MaterialKind::Iv, false) => material::new_random_iv().to_vec(),
        (MaterialKind::Iv, true) => material::new_zero_iv().to_vec(),
        (MaterialKind::Nonce, false) => material::new_random_nonce().to_vec(),
        (MaterialKind::Nonce, true) => material::new_zero_nonce().to_vec(),
    });

    match out {
        Some(path) if role == Role::Key => {
            write_secret(path, &bytes)?;
            info!(role = %role, path = %path.display(), "material written");
        }
        Some(path) => {
            write_file(path, &bytes)?;
            info!(role = %role, path = %path.display(), "material written");
        }
        None if role == Role::Key => {
            anyhow::bail!("keys are never printed; pass --out FILE")
        }
        None => {}
    }

    report(MaterialReport {
        role,
        len: bytes.len(),
        hex: (role != Role::Key).then(|| hex::encode(&bytes[..])),
        path: out.map(|p| p.display().to_string()),
    })
}

fn step(kind: CounterKind, file: &Path, delta: i64, write: bool) -> Result<String> {
    let role = Role::from(kind);
    let mut value = material::load_from_file(file, role)
        .map_err(Error::from)
        .with_context(|| format!("failed to load {role} from {}", file.display()))?;

    match kind {
        CounterKind::Iv => counter::add_iv(&mut value, delta),
        CounterKind::Nonce => counter::add_nonce(&mut value, delta),
    };

    if write {
        write_file(file, &value)?;
        info!(role = %role, delta, path = %file.display(), "counter stepped in place");
    }

    report(MaterialReport {
        role,
        len: value.len(),
        hex: Some(hex::encode(&value)),
        path: write.then(|| file.display().to_string()),
    })
}

// ---------------------------------------------------------------------------
// Encryption
// ---------------------------------------------------------------------------

fn ctr_file(key: &Path, iv: &Path, input: &Path, output: &Path, cfg: &Config) -> Result<String> {
    let key = load_key(key)?;
    let iv = material::read_iv_file(iv)
        .map_err(Error::from)
        .context("failed to load IV")?;
    let data = read_input(input, cfg.max_input_bytes)?;

    let len = data.len();
    let transformed = ctr::encrypt_ctr(key.as_ref(), &iv, data);
    write_file(output, &transformed)?;
    info!(bytes = len, "ctr transform complete");
    Ok(String::new())
}

fn seal(key: &Path, nonce: &Path, aad: Option<&str>, input: &Path, cfg: &Config) -> Result<String> {
    let key = load_key(key)?;
    let nonce = material::read_nonce_file(nonce)
        .map_err(Error::from)
        .context("failed to load nonce")?;
    let plaintext = read_input(input, cfg.max_input_bytes)?;

    let len = plaintext.len();
    let sealed = envelope::seal_envelope(key.as_ref(), &nonce, plaintext, aad_bytes(aad))
        .map_err(Error::from)
        .context("failed to seal input")?;
    info!(bytes = len, "sealed");
    Ok(sealed.to_string())
}

fn open(key: &Path, aad: Option<&str>, input: &Path, output: &Path, cfg: &Config) -> Result<String> {
    let key = load_key(key)?;
    let text = read_input(input, cfg.max_input_bytes)?;
    let text = std::str::from_utf8(&text).context("envelope is not valid UTF-8")?;
    let sealed: SealedEnvelope = text
        .parse()
        .map_err(Error::from)
        .context("failed to parse envelope")?;

    let plaintext = Zeroizing::new(
        envelope::open_envelope(key.as_ref(), sealed, aad_bytes(aad))
            .map_err(Error::from)
            .context("failed to open envelope")?,
    );
    write_file(output, &plaintext)?;
    info!(bytes = plaintext.len(), "opened");
    Ok(String::new())
}

fn split(input: &Path, cfg: &Config) -> Result<String> {
    let data = read_input(input, cfg.max_input_bytes)?;
    let (ciphertext, tag) = gcm::split_ciphertext_tag(&data)
        .map_err(Error::from)
        .context("failed to split ciphertext")?;
    report(SplitReport {
        ciphertext: hex::encode(ciphertext),
        tag: hex::encode(tag),
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_key(path: &Path) -> Result<material::Key> {
    material::read_key_file(path)
        .map_err(Error::from)
        .context("failed to load key")
}

fn aad_bytes(aad: Option<&str>) -> &[u8] {
    aad.map(str::as_bytes).unwrap_or_default()
}

/// Read an input file, refusing anything larger than `limit` bytes.
///
/// The limit is applied to the bytes actually read, not to the size reported
/// by the filesystem beforehand.
fn read_input(path: &Path, limit: u64) -> Result<Vec<u8>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut data = Vec::new();
    file.take(limit.saturating_add(1))
        .read_to_end(&mut data)
        .with_context(|| format!("failed to read {}", path.display()))?;
    if data.len() as u64 > limit {
        anyhow::bail!("{} is above the {limit}-byte input limit", path.display());
    }
    Ok(data)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}

/// Write key bytes to a file only the owner can read (mode 0600 on unix).
///
/// `mode` only applies when the file is created, so an existing file is
/// narrowed explicitly before any key bytes are written to it.
fn write_secret(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options
        .open(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))
            .with_context(|| format!("failed to restrict permissions on {}", path.display()))?;
    }
    file.write_all(bytes)
        .with_context(|| format!("failed to write {}", path.display()))
}

fn report<T: serde::Serialize>(value: T) -> Result<String> {
    serde_json::to_string(&value).context("failed to serialise report")
}
