#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//!
//! # Security Warning
//!
//! **DO NOT USE THIS LIBRARY IN PRODUCTION.**
//!
//! This is an educational implementation for learning and experimentation.
//! It has not been audited, may contain timing side-channels, and provides
//! no security guarantees. The bundled [`mock`] engine in particular is a
//! test double, not a cryptosystem.
//!
//! # Usage
//!
//! ```
//! use fuzzyrs::engine::KeygenSeed;
//! use fuzzyrs::mceliece348864::McEliece348864f;
//! use fuzzyrs::mock::MockEngine;
//! use fuzzyrs::offset::CodeOffset;
//!
//! // Obviously use a fresh random seed irl
//! let seed = KeygenSeed::from([0x42u8; 32]);
//! let engine = MockEngine;
//!
//! let reading = [0x7eu8; 32];
//! let enrollment =
//!     CodeOffset::encode::<McEliece348864f, _>(&engine, &reading, 32, &seed).unwrap();
//!
//! // A probe within the correction bound reproduces the identical key.
//! let mut probe = reading;
//! probe[0] ^= 0x0f;
//! let key = CodeOffset::decode(
//!     &engine,
//!     &probe,
//!     &enrollment.helper,
//!     &enrollment.public_key,
//!     &enrollment.secret_key,
//!     32,
//! )
//! .unwrap();
//! assert_eq!(key, enrollment.key);
//! ```

extern crate alloc;

#[cfg(test)]
mod test_util;

/// Error taxonomy
pub mod error;

/// Code parameter sets and fixed-length vector types
pub mod param;

/// Bit-vector mapping of raw readings
pub mod vect;

/// Parity-check syndrome computation
pub mod syndrome;

/// SHAKE256 key derivation
pub mod xof;

/// Secure erasure and constant-time comparison
pub mod ct;

/// The pluggable code-engine seam and key blob types
pub mod engine;

/// Deterministic engine double for tests and benchmarks
pub mod mock;

/// The code-offset fuzzy-extractor protocol
pub mod offset;

/// Non-fuzzy KEM wrap flows
pub mod wrap;

#[cfg(test)]
extern crate std;

pub use engine::CodeEngine;
pub use error::Error;
pub use offset::{CodeOffset, DerivedKey, Enrollment, HelperData};
pub use param::ParameterSet;
pub use xof::KDF_MAX_BYTES;

/// Classic McEliece 348864f code instance, the geometry the external
/// decoder of the shipped deployment speaks.
pub mod mceliece348864 {
    use super::ParameterSet;
    use hybrid_array::typenum::{U96, U436};

    /// Parameters of the mceliece348864f code: n = 3488, t = 64, with the
    /// PQClean blob lengths for the key material.
    #[derive(Default, Clone, Debug, PartialEq, Eq)]
    pub struct McEliece348864f;

    impl ParameterSet for McEliece348864f {
        const N_BITS: usize = 3488;
        const T: usize = 64;
        const PK_NROWS: usize = 768; // t * gf-bits = 64 * 12
        const PK_ROW_BYTES: usize = 340; // (3488 - 768) / 8
        const PUBLIC_KEY_BYTES: usize = 261_120; // 768 * 340
        const SECRET_KEY_BYTES: usize = 6492;
        // The KEM secret-key blob carries the Niederreiter key at +40.
        const SK_DECODE_OFFSET: usize = 40;

        type NBytes = U436; // 3488 / 8
        type SyndBytes = U96; // 768 / 8
    }
}
