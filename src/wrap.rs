//! Non-fuzzy wrap flows.
//!
//! Two thin alternate entry points that share the engine seam but tolerate
//! no noise at all:
//!
//! - **Plain wrap**: the key is the truncated KEM shared secret; the
//!   ciphertext is stored and the exact same key comes back from
//!   `reconstruct`. The input reading plays no part.
//! - **Masking wrap**: the key is the shared secret XORed with the reading,
//!   indexed cyclically. A probe reading differing in even one byte yields
//!   a different key; there is no correction step.
//!
//! Neither flow is a fuzzy extractor. They exist as the degenerate
//! companions of the code-offset protocol, matching the engine's plain KEM
//! surface.

use crate::ct::secure_erase;
use crate::engine::{Ciphertext, CodeEngine, EncapsSeed, KeygenSeed, PublicKey, SecretKey};
use crate::error::{Error, Result};
use crate::offset::DerivedKey;
use crate::param::ParameterSet;
use crate::xof::KDF_MAX_BYTES;

/// Output of the wrap flows' generate step.
#[derive(Debug)]
pub struct WrappedKey<P: ParameterSet> {
    /// KEM ciphertext to store; needed by the reconstruct step.
    pub ciphertext: Ciphertext<P>,
    /// Public key of the fresh keypair.
    pub public_key: PublicKey<P>,
    /// Secret key of the fresh keypair; guards the wrapped key.
    pub secret_key: SecretKey<P>,
    /// The wrapped key, `klen` bytes.
    pub key: DerivedKey,
}

/// Plain and masking encapsulation flows over a [`CodeEngine`].
pub struct KemWrap;

impl KemWrap {
    /// Fresh keypair, fresh encapsulation, key = shared secret truncated to
    /// `klen` bytes.
    pub fn generate<P, E>(
        engine: &E,
        klen: usize,
        keygen_seed: &KeygenSeed,
        encaps_seed: &EncapsSeed,
    ) -> Result<WrappedKey<P>>
    where
        P: ParameterSet,
        E: CodeEngine<P>,
    {
        check_key_len(klen)?;

        let (public_key, secret_key) = engine.keygen(keygen_seed)?;
        let (ciphertext, mut shared) = engine.encaps(&public_key, encaps_seed)?;

        let key = truncate_masked(shared.as_slice(), &[], klen);
        secure_erase(shared.as_mut_slice());

        Ok(WrappedKey {
            ciphertext,
            public_key,
            secret_key,
            key,
        })
    }

    /// Recover the wrapped key from a stored ciphertext.
    pub fn reconstruct<P, E>(
        engine: &E,
        ciphertext: &Ciphertext<P>,
        secret_key: &SecretKey<P>,
        klen: usize,
    ) -> Result<DerivedKey>
    where
        P: ParameterSet,
        E: CodeEngine<P>,
    {
        check_key_len(klen)?;

        let mut shared = engine.decaps(secret_key, ciphertext)?;
        let key = truncate_masked(shared.as_slice(), &[], klen);
        secure_erase(shared.as_mut_slice());
        Ok(key)
    }

    /// Masking variant of `generate`: key[i] = ss[i] XOR w[i mod wlen].
    pub fn mask_encode<P, E>(
        engine: &E,
        w: &[u8],
        klen: usize,
        keygen_seed: &KeygenSeed,
        encaps_seed: &EncapsSeed,
    ) -> Result<WrappedKey<P>>
    where
        P: ParameterSet,
        E: CodeEngine<P>,
    {
        check_key_len(klen)?;

        let (public_key, secret_key) = engine.keygen(keygen_seed)?;
        let (ciphertext, mut shared) = engine.encaps(&public_key, encaps_seed)?;

        let key = truncate_masked(shared.as_slice(), w, klen);
        secure_erase(shared.as_mut_slice());

        Ok(WrappedKey {
            ciphertext,
            public_key,
            secret_key,
            key,
        })
    }

    /// Masking variant of `reconstruct`. Only the exact enrollment reading
    /// reproduces the key; there is no error tolerance here.
    pub fn mask_decode<P, E>(
        engine: &E,
        wprime: &[u8],
        ciphertext: &Ciphertext<P>,
        secret_key: &SecretKey<P>,
        klen: usize,
    ) -> Result<DerivedKey>
    where
        P: ParameterSet,
        E: CodeEngine<P>,
    {
        check_key_len(klen)?;

        let mut shared = engine.decaps(secret_key, ciphertext)?;
        let key = truncate_masked(shared.as_slice(), wprime, klen);
        secure_erase(shared.as_mut_slice());
        Ok(key)
    }
}

fn check_key_len(klen: usize) -> Result<()> {
    if klen == 0 || klen > KDF_MAX_BYTES {
        return Err(Error::InvalidArgument);
    }
    Ok(())
}

/// First `klen` bytes of `shared`, XOR-masked with `w` indexed cyclically.
/// An empty `w` masks with zero, i.e. plain truncation.
fn truncate_masked(shared: &[u8], w: &[u8], klen: usize) -> DerivedKey {
    let mut buf = [0u8; KDF_MAX_BYTES];
    for (i, b) in buf[..klen].iter_mut().enumerate() {
        let mask = if w.is_empty() { 0 } else { w[i % w.len()] };
        *b = shared[i] ^ mask;
    }
    let key = DerivedKey::from_material(&buf[..klen]);
    secure_erase(&mut buf);
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mceliece348864::McEliece348864f;
    use crate::mock::MockEngine;

    type P = McEliece348864f;

    fn seeds(b: u8) -> (KeygenSeed, EncapsSeed) {
        (KeygenSeed::from([b; 32]), EncapsSeed::from([b ^ 0xff; 32]))
    }

    #[test]
    fn plain_wrap_roundtrips() {
        let engine = MockEngine;
        let (kg, enc) = seeds(1);
        let wrapped = KemWrap::generate::<P, _>(&engine, 32, &kg, &enc).unwrap();
        let key = KemWrap::reconstruct(&engine, &wrapped.ciphertext, &wrapped.secret_key, 32)
            .unwrap();
        assert_eq!(key, wrapped.key);
    }

    #[test]
    fn masking_wrap_roundtrips_on_the_exact_reading() {
        let engine = MockEngine;
        let (kg, enc) = seeds(2);
        let w: [u8; 16] = core::array::from_fn(|i| (i * 3 + 7) as u8);
        let wrapped = KemWrap::mask_encode::<P, _>(&engine, &w, 32, &kg, &enc).unwrap();
        let key =
            KemWrap::mask_decode(&engine, &w, &wrapped.ciphertext, &wrapped.secret_key, 32)
                .unwrap();
        assert_eq!(key, wrapped.key);
    }

    #[test]
    fn masking_wrap_has_no_error_tolerance() {
        let engine = MockEngine;
        let (kg, enc) = seeds(3);
        let w = [0x42u8; 16];
        let wrapped = KemWrap::mask_encode::<P, _>(&engine, &w, 32, &kg, &enc).unwrap();

        let mut wprime = w;
        wprime[0] ^= 0x01;
        let key = KemWrap::mask_decode(
            &engine,
            &wprime,
            &wrapped.ciphertext,
            &wrapped.secret_key,
            32,
        )
        .unwrap();
        assert_ne!(key, wrapped.key);
    }

    #[test]
    fn wrap_rejects_bad_key_lengths() {
        let engine = MockEngine;
        let (kg, enc) = seeds(4);
        assert_eq!(
            KemWrap::generate::<P, _>(&engine, 0, &kg, &enc).unwrap_err(),
            Error::InvalidArgument
        );
        assert_eq!(
            KemWrap::generate::<P, _>(&engine, KDF_MAX_BYTES + 1, &kg, &enc).unwrap_err(),
            Error::InvalidArgument
        );
    }
}
