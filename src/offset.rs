//! Code-offset protocol orchestration.
//!
//! Enrollment (`encode`) binds a noisy reading to a fresh keypair: the
//! reading is mapped to an error vector, its syndrome under the new public
//! description becomes the helper data, and the key is the KDF of the error
//! vector. Verification (`decode`) maps a second reading, XORs its syndrome
//! against the helper data, and by linearity obtains the syndrome of the
//! *difference* between the two readings; the external decoder recovers
//! that difference whenever its weight is at most `t`, and the enrollment
//! vector (hence the key) is reconstructed exactly.
//!
//! The key depends only on the mapped reading, never on the keypair:
//! re-enrolling the same reading under fresh keypairs yields the same key
//! with different helper data. Anyone who can read the raw input can
//! recompute the key without touching helper data, and two enrollments of
//! one input are linkable through key equality. Kept as is; see the crate
//! docs.
//!
//! No weight bound is checked here. Whether a difference is correctable is
//! decided solely by the decoder's success or failure signal.

use core::fmt;

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::ct::secure_erase;
use crate::engine::{CodeEngine, KeygenSeed, PublicKey, SecretKey};
use crate::error::{Error, Result};
use crate::param::{ParameterSet, Syndrome};
use crate::vect::{map_reading, synd_xor, xor_in_place};
use crate::xof::{KDF_MAX_BYTES, kdf};

/// Public helper data: the syndrome of the enrollment error vector. Safe to
/// store and transmit alongside the public code description.
pub type HelperData<P> = Syndrome<P>;

/// Key derived from a reading. Holds at most [`KDF_MAX_BYTES`] bytes,
/// compares in constant time, and zeroes itself on drop.
#[derive(Clone)]
pub struct DerivedKey {
    bytes: [u8; KDF_MAX_BYTES],
    len: usize,
}

impl DerivedKey {
    pub(crate) fn from_material(material: &[u8]) -> Self {
        debug_assert!(material.len() <= KDF_MAX_BYTES);
        let mut bytes = [0u8; KDF_MAX_BYTES];
        bytes[..material.len()].copy_from_slice(material);
        Self {
            bytes,
            len: material.len(),
        }
    }

    /// The key bytes, exactly the requested length.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Requested key length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True only for a zero-length key, which `encode`/`decode` never produce.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl PartialEq for DerivedKey {
    fn eq(&self, other: &Self) -> bool {
        // Length is public; the unused suffix is zero on both sides.
        self.len == other.len && bool::from(self.bytes.ct_eq(&other.bytes))
    }
}

impl Eq for DerivedKey {}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key bytes.
        write!(f, "DerivedKey({} bytes)", self.len)
    }
}

/// Everything `encode` produces for one enrollment. The caller persists
/// `(helper, public_key)` as the enrollment record and guards `secret_key`
/// as a long-term secret; `key` is the extracted secret itself.
#[derive(Debug)]
pub struct Enrollment<P: ParameterSet> {
    /// Syndrome of the enrollment vector; public.
    pub helper: HelperData<P>,
    /// Public code description paired with `secret_key`; public.
    pub public_key: PublicKey<P>,
    /// Decoding trapdoor; long-term secret of the caller.
    pub secret_key: SecretKey<P>,
    /// The extracted key, `klen` bytes.
    pub key: DerivedKey,
}

/// The code-offset construction over an injected [`CodeEngine`].
pub struct CodeOffset;

impl CodeOffset {
    /// Enroll a reading `w`, deriving a `klen`-byte key.
    ///
    /// # Algorithm
    /// 1. (pk, sk) = engine.keygen(seed)
    /// 2. e = map(w)
    /// 3. helper = syndrome(pk, e)
    /// 4. key = KDF(e)[..klen]
    ///
    /// # Errors
    /// `InvalidArgument` if `klen` is 0 or exceeds [`KDF_MAX_BYTES`],
    /// checked before the engine is invoked. `KeygenFailure` propagated
    /// from the engine, never retried.
    pub fn encode<P, E>(
        engine: &E,
        w: &[u8],
        klen: usize,
        seed: &KeygenSeed,
    ) -> Result<Enrollment<P>>
    where
        P: ParameterSet,
        E: CodeEngine<P>,
    {
        check_key_len(klen)?;

        let (public_key, secret_key) = engine.keygen(seed)?;

        let mut e = map_reading::<P>(w);
        let helper = crate::syndrome::syndrome(&public_key, &e);
        let key = derive_key(e.as_slice(), klen);
        secure_erase(e.as_mut_slice());

        Ok(Enrollment {
            helper,
            public_key,
            secret_key,
            key,
        })
    }

    /// Verify a probe reading `w'` against an enrollment record.
    ///
    /// # Algorithm
    /// 1. e' = map(w')
    /// 2. s_delta = helper XOR syndrome(pk, e'), the syndrome of e XOR e'
    /// 3. correction = engine.decode(sk, s_delta)
    /// 4. e = e' XOR correction
    /// 5. key = KDF(e)[..klen]
    ///
    /// If `map(w)` and `map(w')` differ in at most `t` positions this
    /// returns the enrollment key. Intermediates are erased on every exit
    /// path, including decode failure.
    ///
    /// # Errors
    /// `InvalidArgument` for a bad `klen`, checked before the engine is
    /// invoked. `DecodeFailure` when no correction of weight <= `t`
    /// exists: the expected rejection of a probe too far from the
    /// enrollment.
    pub fn decode<P, E>(
        engine: &E,
        wprime: &[u8],
        helper: &HelperData<P>,
        public_key: &PublicKey<P>,
        secret_key: &SecretKey<P>,
        klen: usize,
    ) -> Result<DerivedKey>
    where
        P: ParameterSet,
        E: CodeEngine<P>,
    {
        check_key_len(klen)?;

        let mut e_prime = map_reading::<P>(wprime);
        let mut s_prime = crate::syndrome::syndrome(public_key, &e_prime);
        let mut s_delta = synd_xor::<P>(helper, &s_prime);
        secure_erase(s_prime.as_mut_slice());

        let decoded = engine.decode(secret_key, &s_delta);
        secure_erase(s_delta.as_mut_slice());

        let mut correction = match decoded {
            Ok(c) => c,
            Err(err) => {
                secure_erase(e_prime.as_mut_slice());
                return Err(err);
            }
        };

        // Reconstruct the enrollment vector in place.
        xor_in_place(correction.as_mut_slice(), e_prime.as_slice());
        let key = derive_key(correction.as_slice(), klen);

        secure_erase(correction.as_mut_slice());
        secure_erase(e_prime.as_mut_slice());

        Ok(key)
    }
}

fn check_key_len(klen: usize) -> Result<()> {
    if klen == 0 || klen > KDF_MAX_BYTES {
        return Err(Error::InvalidArgument);
    }
    Ok(())
}

/// Expand `v` through the KDF and keep the first `klen` bytes; the full
/// expansion is erased before returning.
fn derive_key(v: &[u8], klen: usize) -> DerivedKey {
    let mut expansion = kdf(v);
    let key = DerivedKey::from_material(&expansion[..klen]);
    secure_erase(expansion.as_mut_slice());
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mceliece348864::McEliece348864f;
    use crate::mock::MockEngine;

    extern crate std;
    use std::vec;
    use std::vec::Vec;

    type P = McEliece348864f;

    fn seed(b: u8) -> KeygenSeed {
        KeygenSeed::from([b; 32])
    }

    /// Flip `count` distinct low bit positions, as the reference sweep does.
    fn flip_bits(w: &[u8], count: usize) -> Vec<u8> {
        let mut out = w.to_vec();
        for pos in 0..count {
            out[pos / 8] ^= 1 << (pos % 8);
        }
        out
    }

    #[test]
    fn identical_probe_reproduces_the_key() {
        let engine = MockEngine;
        let w = [0u8; 32];
        let enr = CodeOffset::encode::<P, _>(&engine, &w, 32, &seed(1)).unwrap();
        let key = CodeOffset::decode(
            &engine,
            &w,
            &enr.helper,
            &enr.public_key,
            &enr.secret_key,
            32,
        )
        .unwrap();
        assert_eq!(key, enr.key);
    }

    #[test]
    fn probe_at_the_correction_bound_still_matches() {
        let engine = MockEngine;
        let w = [0x3cu8; 32];
        let enr = CodeOffset::encode::<P, _>(&engine, &w, 32, &seed(2)).unwrap();

        let wprime = flip_bits(&w, P::T);
        let key = CodeOffset::decode(
            &engine,
            &wprime,
            &enr.helper,
            &enr.public_key,
            &enr.secret_key,
            32,
        )
        .unwrap();
        assert_eq!(key, enr.key);
    }

    #[test]
    fn probe_just_beyond_the_bound_is_rejected() {
        let engine = MockEngine;
        let w = [0x3cu8; 32];
        let enr = CodeOffset::encode::<P, _>(&engine, &w, 32, &seed(3)).unwrap();

        let wprime = flip_bits(&w, P::T + 1);
        let err = CodeOffset::decode(
            &engine,
            &wprime,
            &enr.helper,
            &enr.public_key,
            &enr.secret_key,
            32,
        )
        .unwrap_err();
        assert_eq!(err, Error::DecodeFailure);
    }

    #[test]
    fn key_is_independent_of_the_keypair() {
        let engine = MockEngine;
        // Long enough to engage the stored rows, so the helper data picks
        // up keypair randomness while the key does not.
        let mut w = vec![0u8; 200];
        crate::test_util::TestRng::new().fill(&mut w);
        let a = CodeOffset::encode::<P, _>(&engine, &w, 32, &seed(4)).unwrap();
        let b = CodeOffset::encode::<P, _>(&engine, &w, 32, &seed(5)).unwrap();
        assert_eq!(a.key, b.key);
        assert_ne!(a.helper, b.helper);
    }

    #[test]
    fn truncated_keys_are_prefixes_of_the_full_expansion() {
        let engine = MockEngine;
        let w = [0x11u8; 32];
        let full = CodeOffset::encode::<P, _>(&engine, &w, 32, &seed(6)).unwrap();
        let short = CodeOffset::encode::<P, _>(&engine, &w, 16, &seed(7)).unwrap();
        assert_eq!(short.key.as_slice(), &full.key.as_slice()[..16]);
    }

    #[test]
    fn zero_key_length_is_rejected() {
        let engine = MockEngine;
        let err = CodeOffset::encode::<P, _>(&engine, &[0u8; 32], 0, &seed(8)).unwrap_err();
        assert_eq!(err, Error::InvalidArgument);
    }

    #[test]
    fn oversized_key_length_is_rejected() {
        let engine = MockEngine;
        let err =
            CodeOffset::encode::<P, _>(&engine, &[0u8; 32], KDF_MAX_BYTES + 1, &seed(9)).unwrap_err();
        assert_eq!(err, Error::InvalidArgument);

        let enr = CodeOffset::encode::<P, _>(&engine, &[0u8; 32], 32, &seed(9)).unwrap();
        let err = CodeOffset::decode(
            &engine,
            &[0u8; 32],
            &enr.helper,
            &enr.public_key,
            &enr.secret_key,
            KDF_MAX_BYTES + 1,
        )
        .unwrap_err();
        assert_eq!(err, Error::InvalidArgument);
    }

    #[test]
    fn derived_key_buffer_zeroizes() {
        // Same zeroize call the Drop impl runs, observed on a live key.
        let mut key = DerivedKey::from_material(&[0xa5; 32]);
        key.bytes.zeroize();
        assert!(key.bytes.iter().all(|&b| b == 0));
    }

    #[test]
    fn derived_key_equality_is_by_content_and_length() {
        let a = DerivedKey::from_material(&[1, 2, 3, 4]);
        let b = DerivedKey::from_material(&[1, 2, 3, 4]);
        let c = DerivedKey::from_material(&[1, 2, 3]);
        let d = DerivedKey::from_material(&[1, 2, 3, 5]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }
}
