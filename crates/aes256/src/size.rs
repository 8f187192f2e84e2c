//! Width checks for fixed-size key material.
//!
//! Two flavours exist on purpose:
//! - [`validate`] returns a [`MaterialError::SizeMismatch`] and is used where
//!   bytes arrive from outside (files, tool arguments).
//! - [`require`] panics. It guards in-memory operations, where a mis-sized
//!   buffer is a programming error and continuing would be unsafe.

use common::{MaterialError, Role};

/// Check that `buf` is exactly as wide as `role` demands.
///
/// # Errors
///
/// Returns [`MaterialError::SizeMismatch`] carrying `buf.len()` on mismatch.
pub fn validate(buf: &[u8], role: Role) -> Result<(), MaterialError> {
    if buf.len() != role.width() {
        return Err(MaterialError::SizeMismatch {
            role,
            len: buf.len(),
        });
    }
    Ok(())
}

/// Check that `tag` is exactly [`common::TAG_SIZE`] bytes.
///
/// # Errors
///
/// Returns [`MaterialError::SizeMismatch`] with role [`Role::Tag`].
pub fn validate_tag(tag: &[u8]) -> Result<(), MaterialError> {
    validate(tag, Role::Tag)
}

/// View `buf` as a fixed-width array for `role`, panicking on mismatch.
///
/// `op` names the public operation in the panic message.
pub(crate) fn require<'a, const N: usize>(buf: &'a [u8], role: Role, op: &str) -> &'a [u8; N] {
    debug_assert_eq!(N, role.width());
    match buf.try_into() {
        Ok(fixed) => fixed,
        Err(_) => defect(op, role, buf.len()),
    }
}

/// Panic unless `len` is the width of `role`.
pub(crate) fn require_len(len: usize, role: Role, op: &str) {
    if len != role.width() {
        defect(op, role, len);
    }
}

#[cold]
#[track_caller]
fn defect(op: &str, role: Role, len: usize) -> ! {
    panic!(
        "aes256::{op}: {}",
        MaterialError::SizeMismatch { role, len }
    )
}
