//! Per-message IV and nonce sequences.
//!
//! A [`CounterSequence`] starts at a base value and yields it, then the base
//! plus `step`, plus `2 * step`, and so on, wrapping at the fixed width. The
//! iterator never ends; take as many values as there are messages.

use std::iter::FusedIterator;

use common::{Role, IV_SIZE, NONCE_SIZE};

use crate::counter::{add_iv, add_nonce};
use crate::size;

type StepFn = for<'a> fn(&'a mut [u8], i64) -> &'a mut [u8];

/// Endless iterator over counter values of width `N`.
#[derive(Clone)]
pub struct CounterSequence<const N: usize> {
    next: [u8; N],
    step: i64,
    add: StepFn,
}

impl<const N: usize> CounterSequence<N> {
    /// The value the next call to [`Iterator::next`] will yield.
    pub fn peek(&self) -> &[u8; N] {
        &self.next
    }

    /// Signed distance between consecutive values.
    pub fn step(&self) -> i64 {
        self.step
    }
}

impl<const N: usize> Iterator for CounterSequence<N> {
    type Item = [u8; N];

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next;
        (self.add)(&mut self.next, self.step);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<const N: usize> FusedIterator for CounterSequence<N> {}

impl<const N: usize> std::fmt::Debug for CounterSequence<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CounterSequence")
            .field("next", &self.next)
            .field("step", &self.step)
            .finish()
    }
}

/// IVs counting from `base` by `step` modulo `2^128`.
///
/// # Panics
///
/// Panics if `base` is not [`IV_SIZE`] bytes.
pub fn iv_sequence(base: &[u8], step: i64) -> CounterSequence<IV_SIZE> {
    CounterSequence {
        next: *size::require(base, Role::Iv, "iv_sequence"),
        step,
        add: add_iv,
    }
}

/// Nonces counting from `base` by `step` modulo `2^96`.
///
/// # Panics
///
/// Panics if `base` is not [`NONCE_SIZE`] bytes.
pub fn nonce_sequence(base: &[u8], step: i64) -> CounterSequence<NONCE_SIZE> {
    CounterSequence {
        next: *size::require(base, Role::Nonce, "nonce_sequence"),
        step,
        add: add_nonce,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_value_is_base() {
        let base = [0x42u8; NONCE_SIZE];
        let mut seq = nonce_sequence(&base, 1);
        assert_eq!(seq.peek(), &base);
        assert_eq!(seq.next(), Some(base));
    }

    #[test]
    fn counts_upward() {
        let values: Vec<_> = nonce_sequence(&[0u8; NONCE_SIZE], 1).take(3).collect();
        assert_eq!(values[0][11], 0);
        assert_eq!(values[1][11], 1);
        assert_eq!(values[2][11], 2);
    }

    #[test]
    fn counts_downward_through_zero() {
        let mut base = [0u8; IV_SIZE];
        base[15] = 1;
        let values: Vec<_> = iv_sequence(&base, -1).take(3).collect();
        assert_eq!(values[1], [0u8; IV_SIZE]);
        assert_eq!(values[2], [0xffu8; IV_SIZE]);
    }

    #[test]
    fn wraps_upward_past_max() {
        let mut seq = iv_sequence(&[0xffu8; IV_SIZE], 2);
        seq.next();
        let mut expected = [0u8; IV_SIZE];
        expected[15] = 1;
        assert_eq!(seq.next(), Some(expected));
    }

    #[test]
    fn values_are_distinct() {
        let values: Vec<_> = nonce_sequence(&[0u8; NONCE_SIZE], 7).take(64).collect();
        let unique: std::collections::HashSet<_> = values.iter().collect();
        assert_eq!(unique.len(), values.len());
    }

    #[test]
    #[should_panic(expected = "aes256::iv_sequence: aes256: invalid IV size 12")]
    fn iv_sequence_rejects_nonce_base() {
        iv_sequence(&[0u8; NONCE_SIZE], 1);
    }
}
