//! Syndrome engine: the parity-check map of the code.
//!
//! Computes `s = H e` for the systematic parity-check matrix `H = [I | Q]`,
//! where `Q` is the stored public code description. For output bit `i`, the
//! implicit matrix row carries a single identity bit at position `i` of the
//! low-order columns (LSB-first within bytes) and the `i`-th stored row as
//! the high-order columns.
//!
//! This bit layout reproduces the external decoder's own syndrome
//! convention (PQClean Classic McEliece `encrypt.c`). The two must agree
//! exactly or difference-syndrome decoding fails silently; nothing here may
//! be "simplified" without re-verifying against the decoder.

use crate::engine::PublicKey;
use crate::param::{self, ErrorVect, ParameterSet, Syndrome, n_bytes, synd_bytes};

/// Syndrome of `e` under the code described by `pk`.
///
/// Pure and deterministic: no randomness, no side effects, no secret
/// material. Used both at enrollment (helper = syndrome of the enrollment
/// vector) and at verification (candidate syndrome of the probe vector).
pub fn syndrome<P: ParameterSet>(pk: &PublicKey<P>, e: &ErrorVect<P>) -> Syndrome<P> {
    param::check_consistency::<P>();
    debug_assert_eq!(synd_bytes::<P>() + P::PK_ROW_BYTES, n_bytes::<P>());

    // The identity block covers the first PK_NROWS bits of e; the stored
    // rows cover the remaining columns.
    let tail = &e[synd_bytes::<P>()..];

    let mut s = Syndrome::<P>::default();
    for i in 0..P::PK_NROWS {
        let mut b = 0u8;
        for (r, t) in pk.row(i).iter().zip(tail) {
            b ^= r & t;
        }
        // Fold the byte-wide XOR accumulator down to one parity bit.
        b ^= b >> 4;
        b ^= b >> 2;
        b ^= b >> 1;
        b &= 1;

        // Identity contribution: bit i of e itself.
        b ^= (e[i / 8] >> (i % 8)) & 1;

        s[i / 8] |= b << (i % 8);
    }
    s
}
