//! Deterministic mock code engine.
//!
//! Stands in for the real Goppa-decoding backend in tests and benchmarks.
//! Keygen expands the seed into a pseudorandom public description through
//! SHAKE256, so every seed yields one fixed keypair. The decoder is a
//! window decoder for the systematic code: the decodable error patterns are
//! exactly those supported on the identity columns, where the syndrome *is*
//! the error pattern. It succeeds iff the syndrome weight is at most `t`
//! and fails deterministically otherwise.
//!
//! Differences that stray outside the identity window pick up parity
//! contributions from the stored rows and reconstruct incorrectly; tests
//! use that to provoke mismatched keys without a real decoder.
//!
//! Not a cryptosystem. The seed is recoverable from the key blobs, and the
//! KEM operations are plain XOF evaluations tied together by a public-key
//! fingerprint.

use alloc::vec;
use hybrid_array::{Array, typenum::U32};

use crate::engine::{
    Ciphertext, CodeEngine, EncapsSeed, KeygenSeed, PublicKey, SecretKey, SharedSecret,
};
use crate::error::{Error, Result};
use crate::param::{ErrorVect, ParameterSet, Syndrome, synd_bytes};
use crate::vect::weight;
use crate::xof::{CT_DOMAIN_SEP, PK_DOMAIN_SEP, SS_DOMAIN_SEP, Xof};

/// Length of the fingerprint prefix shared by the mock's key blobs.
const FINGERPRINT_BYTES: usize = 32;

/// Stateless deterministic engine; see the module docs.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockEngine;

/// First 32 bytes of the XOF-expanded public description for `seed`;
/// doubles as the link between encaps (which holds pk) and decaps (which
/// re-derives it from the seed stored in sk).
fn fingerprint(seed: &[u8]) -> Array<u8, U32> {
    let mut fp = Array::<u8, U32>::default();
    Xof::init(seed, PK_DOMAIN_SEP).squeeze(fp.as_mut_slice());
    fp
}

impl<P: ParameterSet> CodeEngine<P> for MockEngine {
    fn keygen(&self, seed: &KeygenSeed) -> Result<(PublicKey<P>, SecretKey<P>)> {
        let mut pk_bytes = vec![0u8; P::PUBLIC_KEY_BYTES].into_boxed_slice();
        Xof::init(seed.as_slice(), PK_DOMAIN_SEP).squeeze(&mut pk_bytes);
        let pk = PublicKey::from_boxed(pk_bytes).map_err(|_| Error::KeygenFailure)?;

        // Like the real trapdoor blob, the secret key carries its
        // generating seed at the front.
        let mut sk = SecretKey::<P>::zeroed();
        sk.as_bytes_mut()[..FINGERPRINT_BYTES].copy_from_slice(seed.as_slice());

        Ok((pk, sk))
    }

    fn decode(&self, _sk: &SecretKey<P>, synd: &Syndrome<P>) -> Result<ErrorVect<P>> {
        if weight(synd.as_slice()) > P::T {
            return Err(Error::DecodeFailure);
        }
        // Identity-window correction: the error is the syndrome itself,
        // placed in the low-order columns.
        let mut e = ErrorVect::<P>::default();
        e[..synd_bytes::<P>()].copy_from_slice(synd.as_slice());
        Ok(e)
    }

    fn encaps(&self, pk: &PublicKey<P>, seed: &EncapsSeed) -> Result<(Ciphertext<P>, SharedSecret)> {
        let fp = &pk.as_bytes()[..FINGERPRINT_BYTES];

        let mut ct = Ciphertext::<P>::default();
        let mut xof = Xof::init(seed.as_slice(), CT_DOMAIN_SEP);
        xof.squeeze(ct.as_mut_slice());

        let ss = shared_secret(fp, ct.as_slice());
        Ok((ct, ss))
    }

    fn decaps(&self, sk: &SecretKey<P>, ct: &Ciphertext<P>) -> Result<SharedSecret> {
        let seed = &sk.as_bytes()[..FINGERPRINT_BYTES];
        let fp = fingerprint(seed);
        Ok(shared_secret(fp.as_slice(), ct.as_slice()))
    }
}

fn shared_secret(fp: &[u8], ct: &[u8]) -> SharedSecret {
    let mut material = vec![0u8; fp.len() + ct.len()];
    material[..fp.len()].copy_from_slice(fp);
    material[fp.len()..].copy_from_slice(ct);

    let mut ss = SharedSecret::default();
    let mut xof = Xof::init(&material, SS_DOMAIN_SEP);
    xof.squeeze(ss.as_mut_slice());
    ss
}
