//! Bit-vector mapping and GF(2) vector helpers.
//!
//! The mapper turns a variable-length reading into the fixed error-vector
//! length of the code: truncate when the reading is longer, zero-pad when it
//! is shorter, all-zero when it is absent.
//!
//! Caveat: this mapping preserves Hamming distance between two readings only
//! when both have the same length and are padded identically. Callers that
//! supply variable-length readings accept distorted fuzziness guarantees;
//! that is a documented limitation of the construction, not something this
//! layer tries to repair.

use crate::param::{ErrorVect, ParameterSet, Syndrome};

/// Map a raw reading into an error vector of the code's block length.
///
/// Takes the first `n_bytes` of `w` if it is long enough, otherwise copies
/// `w` into the low-order bytes and leaves the remainder zero. An empty
/// reading yields the all-zero vector.
pub fn map_reading<P: ParameterSet>(w: &[u8]) -> ErrorVect<P> {
    let mut e = ErrorVect::<P>::default();
    let take = core::cmp::min(w.len(), e.len());
    e[..take].copy_from_slice(&w[..take]);
    e
}

/// XOR `src` into `dst` in place.
#[inline]
pub(crate) fn xor_in_place(dst: &mut [u8], src: &[u8]) {
    debug_assert_eq!(dst.len(), src.len());
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= s;
    }
}

/// XOR of two syndromes, used to form the difference-syndrome during decode.
pub(crate) fn synd_xor<P: ParameterSet>(a: &Syndrome<P>, b: &Syndrome<P>) -> Syndrome<P> {
    let mut out = a.clone();
    xor_in_place(out.as_mut_slice(), b.as_slice());
    out
}

/// Hamming weight of a byte-packed bit vector.
pub(crate) fn weight(v: &[u8]) -> usize {
    v.iter().map(|b| b.count_ones() as usize).sum()
}
