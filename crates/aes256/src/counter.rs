//! Counter arithmetic over IVs and nonces.
//!
//! An IV is a 128-bit and a nonce a 96-bit big-endian unsigned integer. All
//! arithmetic is modulo `2^(width * 8)`: incrementing the maximum value wraps
//! to all zeroes and decrementing zero wraps to all `0xff`. Overflow is never
//! an error.
//!
//! The `add_*`/`inc_*`/`dec_*` functions update the caller's buffer in place
//! and return the same buffer, so the argument and the return value always
//! agree. Passing a buffer of the wrong width panics.

use std::sync::LazyLock;

use common::{Role, IV_SIZE, NONCE_SIZE};
use num_bigint::{BigInt, Sign};

use crate::size;

/// One greater than the maximum IV value.
static IV_MODULUS: LazyLock<BigInt> = LazyLock::new(|| BigInt::from(1u8) << (IV_SIZE * 8));

/// One greater than the maximum nonce value.
static NONCE_MODULUS: LazyLock<BigInt> = LazyLock::new(|| BigInt::from(1u8) << (NONCE_SIZE * 8));

/// Add `x` to `buf` modulo `modulus`, writing the zero-padded big-endian
/// result back into `buf`.
fn add_wrapping<'a>(buf: &'a mut [u8], modulus: &BigInt, x: i64) -> &'a mut [u8] {
    let mut z = BigInt::from_bytes_be(Sign::Plus, buf);
    z += x;
    z %= modulus;
    if z.sign() == Sign::Minus {
        z += modulus;
    }

    // 0 <= z < 2^(len * 8), so the magnitude always fits.
    let (_, bytes) = z.to_bytes_be();
    let offset = buf.len() - bytes.len();
    buf[..offset].fill(0);
    buf[offset..].copy_from_slice(&bytes);
    buf
}

// ---------------------------------------------------------------------------
// IV
// ---------------------------------------------------------------------------

/// Add `x` to the IV, wrapping around at `2^128`.
pub fn add_iv(iv: &mut [u8], x: i64) -> &mut [u8] {
    size::require_len(iv.len(), Role::Iv, "add_iv");
    add_wrapping(iv, &IV_MODULUS, x)
}

/// Increment the IV by one. The maximum IV wraps to zero.
pub fn inc_iv(iv: &mut [u8]) -> &mut [u8] {
    add_iv(iv, 1)
}

/// Decrement the IV by one. The zero IV wraps to all `0xff`.
pub fn dec_iv(iv: &mut [u8]) -> &mut [u8] {
    add_iv(iv, -1)
}

/// Deep copy of the IV.
pub fn copy_iv(iv: &[u8]) -> [u8; IV_SIZE] {
    *size::require(iv, Role::Iv, "copy_iv")
}

/// Copy the IV and keep its trailing [`NONCE_SIZE`] bytes as a nonce.
pub fn iv_to_nonce(iv: &[u8]) -> [u8; NONCE_SIZE] {
    let copy: [u8; IV_SIZE] = *size::require(iv, Role::Iv, "iv_to_nonce");
    let mut nonce = [0u8; NONCE_SIZE];
    nonce.copy_from_slice(&copy[IV_SIZE - NONCE_SIZE..]);
    nonce
}

// ---------------------------------------------------------------------------
// Nonce
// ---------------------------------------------------------------------------

/// Add `x` to the nonce, wrapping around at `2^96`.
pub fn add_nonce(nonce: &mut [u8], x: i64) -> &mut [u8] {
    size::require_len(nonce.len(), Role::Nonce, "add_nonce");
    add_wrapping(nonce, &NONCE_MODULUS, x)
}

/// Increment the nonce by one. The maximum nonce wraps to zero.
pub fn inc_nonce(nonce: &mut [u8]) -> &mut [u8] {
    add_nonce(nonce, 1)
}

/// Decrement the nonce by one. The zero nonce wraps to all `0xff`.
pub fn dec_nonce(nonce: &mut [u8]) -> &mut [u8] {
    add_nonce(nonce, -1)
}

/// Deep copy of the nonce.
pub fn copy_nonce(nonce: &[u8]) -> [u8; NONCE_SIZE] {
    *size::require(nonce, Role::Nonce, "copy_nonce")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inc_iv_wraps_max_to_zero() {
        let mut iv = [0xffu8; IV_SIZE];
        let out = inc_iv(&mut iv);
        assert_eq!(out, &[0u8; IV_SIZE][..]);
        assert_eq!(iv, [0u8; IV_SIZE]);
    }

    #[test]
    fn dec_iv_wraps_zero_to_max() {
        let mut iv = [0u8; IV_SIZE];
        dec_iv(&mut iv);
        assert_eq!(iv, [0xffu8; IV_SIZE]);
    }

    #[test]
    fn inc_nonce_wraps_max_to_zero() {
        let mut nonce = [0xffu8; NONCE_SIZE];
        inc_nonce(&mut nonce);
        assert_eq!(nonce, [0u8; NONCE_SIZE]);
    }

    #[test]
    fn dec_nonce_wraps_zero_to_max() {
        let mut nonce = [0u8; NONCE_SIZE];
        dec_nonce(&mut nonce);
        assert_eq!(nonce, [0xffu8; NONCE_SIZE]);
    }

    #[test]
    fn inc_carries_across_bytes() {
        let mut iv = [0u8; IV_SIZE];
        iv[15] = 0xff;
        inc_iv(&mut iv);
        let mut expected = [0u8; IV_SIZE];
        expected[14] = 0x01;
        assert_eq!(iv, expected);
    }

    #[test]
    fn dec_borrows_across_bytes() {
        let mut nonce = [0u8; NONCE_SIZE];
        nonce[10] = 0x01;
        dec_nonce(&mut nonce);
        let mut expected = [0u8; NONCE_SIZE];
        expected[11] = 0xff;
        assert_eq!(nonce, expected);
    }

    #[test]
    fn add_large_delta() {
        let mut nonce = [0u8; NONCE_SIZE];
        add_nonce(&mut nonce, i64::MAX);
        let mut expected = [0u8; NONCE_SIZE];
        expected[4..].copy_from_slice(&i64::MAX.to_be_bytes());
        assert_eq!(nonce, expected);
    }

    #[test]
    fn add_negative_delta_wraps() {
        let mut iv = [0u8; IV_SIZE];
        add_iv(&mut iv, -256);
        let mut expected = [0xffu8; IV_SIZE];
        expected[15] = 0x00;
        assert_eq!(iv, expected);
    }

    #[test]
    fn add_zero_is_identity() {
        let mut iv: [u8; IV_SIZE] = core::array::from_fn(|i| i as u8);
        let before = iv;
        add_iv(&mut iv, 0);
        assert_eq!(iv, before);
    }

    #[test]
    fn copy_does_not_alias() {
        let mut iv = [0x11u8; IV_SIZE];
        let copy = copy_iv(&iv);
        inc_iv(&mut iv);
        assert_eq!(copy, [0x11u8; IV_SIZE]);
        assert_ne!(copy, iv);

        let nonce = [0x22u8; NONCE_SIZE];
        assert_eq!(copy_nonce(&nonce), nonce);
    }

    #[test]
    fn iv_to_nonce_keeps_trailing_bytes() {
        let iv: [u8; IV_SIZE] = core::array::from_fn(|i| i as u8);
        let expected: [u8; NONCE_SIZE] = core::array::from_fn(|i| (i + 4) as u8);
        assert_eq!(iv_to_nonce(&iv), expected);
    }

    #[test]
    #[should_panic(expected = "aes256::add_iv: aes256: invalid IV size 10")]
    fn add_iv_rejects_wrong_width() {
        let mut buf = [0u8; 10];
        inc_iv(&mut buf);
    }

    #[test]
    #[should_panic(expected = "aes256::add_nonce")]
    fn add_nonce_rejects_iv_width() {
        let mut buf = [0u8; IV_SIZE];
        inc_nonce(&mut buf);
    }

    #[test]
    #[should_panic(expected = "aes256::iv_to_nonce")]
    fn iv_to_nonce_rejects_nonce_input() {
        iv_to_nonce(&[0u8; NONCE_SIZE]);
    }
}
