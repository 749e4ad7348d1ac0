//! Hygiene primitives: guaranteed erasure and constant-time comparison.

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// Overwrite every byte of `buf` with zero, in a way the optimizer cannot
/// elide even though the buffer is dead afterwards.
pub fn secure_erase(buf: &mut [u8]) {
    buf.zeroize();
}

/// Compare two equal-length byte strings in time independent of where the
/// first difference sits. Zero-length inputs compare equal. Inputs of
/// differing length compare unequal; length is the only data-dependent
/// branch, and key lengths are fixed in this system.
pub fn constant_time_equal(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
