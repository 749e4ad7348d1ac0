use core::fmt::Debug;

use hybrid_array::{Array, ArraySize, typenum::Unsigned};

/// Code parameter set trait defining the geometry of one linear-code instance.
///
/// All lengths are fixed constants of the chosen error-correcting code and
/// must agree bit for bit with the external decoding oracle. The parity-check
/// matrix is in systematic form `H = [I | Q]`: the first `PK_NROWS` columns
/// form the identity block, and the public code description stores `Q` as
/// `PK_NROWS` rows of `PK_ROW_BYTES` bytes each.
pub trait ParameterSet: Default + Clone + Debug + PartialEq + Eq {
    /// Block length of the code in bits, denoted `n`
    const N_BITS: usize;

    /// Maximum error weight the external decoder is guaranteed to correct, denoted `t`
    const T: usize;

    /// Number of parity-check rows, i.e. syndrome length in bits
    const PK_NROWS: usize;

    /// Bytes per stored row of the non-identity block `Q`: ceil((n - PK_NROWS) / 8)
    const PK_ROW_BYTES: usize;

    /// Total public code description length: PK_NROWS * PK_ROW_BYTES
    const PUBLIC_KEY_BYTES: usize;

    /// Secret trapdoor blob length
    const SECRET_KEY_BYTES: usize;

    /// Byte offset of the decoder's key material inside the secret trapdoor blob
    const SK_DECODE_OFFSET: usize;

    /// Error vector length in bytes: ceil(n / 8)
    type NBytes: ArraySize;

    /// Syndrome / helper-data length in bytes: ceil(PK_NROWS / 8)
    type SyndBytes: ArraySize;
}

/// F2^n error vector, byte-packed LSB-first within each byte
pub type ErrorVect<P> = Array<u8, <P as ParameterSet>::NBytes>;

/// Syndrome of an error vector under the parity-check map; doubles as helper data
pub type Syndrome<P> = Array<u8, <P as ParameterSet>::SyndBytes>;

/// Error vector length in bytes for a parameter set
#[inline]
pub(crate) fn n_bytes<P: ParameterSet>() -> usize {
    <P::NBytes as Unsigned>::USIZE
}

/// Syndrome length in bytes for a parameter set
#[inline]
pub(crate) fn synd_bytes<P: ParameterSet>() -> usize {
    <P::SyndBytes as Unsigned>::USIZE
}

/// Consistency checks between the scalar constants and the typed array
/// sizes. Invoked from debug assertions where both views of a length meet.
pub(crate) fn check_consistency<P: ParameterSet>() {
    debug_assert_eq!(n_bytes::<P>() * 8, P::N_BITS);
    debug_assert_eq!(synd_bytes::<P>() * 8, P::PK_NROWS);
    debug_assert_eq!(P::PUBLIC_KEY_BYTES, P::PK_NROWS * P::PK_ROW_BYTES);
    debug_assert_eq!(P::PK_ROW_BYTES * 8, P::N_BITS - P::PK_NROWS);
    debug_assert!(P::T <= P::PK_NROWS);
}
