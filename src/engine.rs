//! The external-oracle seam.
//!
//! Keypair generation and syndrome decoding belong to an external
//! code-based engine (for the shipped parameter set, a Classic McEliece
//! implementation). The protocol consumes that engine through the
//! [`CodeEngine`] trait so alternate backends can be substituted and the
//! protocol can be unit-tested against a deterministic double.
//!
//! Randomness is never drawn implicitly: keygen and encapsulation take an
//! explicit 32-byte seed, so every operation in this crate is a pure
//! function of its arguments. Callers wanting fresh keys supply a fresh
//! random seed.

use core::fmt;
use core::marker::PhantomData;

use alloc::boxed::Box;
use alloc::vec;
use hybrid_array::{Array, typenum::U32};
use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::param::{ErrorVect, ParameterSet, Syndrome};

/// Seed driving keypair generation; same seed, same keypair.
pub type KeygenSeed = Array<u8, U32>;

/// Seed driving the encapsulation randomness in the non-fuzzy wrap flows.
pub type EncapsSeed = Array<u8, U32>;

/// Shared secret produced by the engine's KEM operations.
pub type SharedSecret = Array<u8, U32>;

/// KEM ciphertext. For a Niederreiter-style engine this is exactly a
/// syndrome, so the two share a representation.
pub type Ciphertext<P> = Syndrome<P>;

/// Public code description: the non-identity block `Q` of the systematic
/// parity-check matrix, stored row-major as `PK_NROWS x PK_ROW_BYTES`.
///
/// Hundreds of kilobytes for realistic codes, hence heap-backed. Public and
/// safe to store alongside helper data as the enrollment record.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey<P: ParameterSet> {
    bytes: Box<[u8]>,
    _marker: PhantomData<P>,
}

impl<P: ParameterSet> PublicKey<P> {
    /// Validate and take ownership of a public code description.
    ///
    /// # Errors
    /// `EncodeFailure` if the blob is not exactly `PUBLIC_KEY_BYTES` long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != P::PUBLIC_KEY_BYTES {
            return Err(Error::EncodeFailure);
        }
        Ok(Self {
            bytes: bytes.into(),
            _marker: PhantomData,
        })
    }

    pub(crate) fn from_boxed(bytes: Box<[u8]>) -> Result<Self> {
        if bytes.len() != P::PUBLIC_KEY_BYTES {
            return Err(Error::EncodeFailure);
        }
        Ok(Self {
            bytes,
            _marker: PhantomData,
        })
    }

    /// The raw description, `PK_NROWS * PK_ROW_BYTES` bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Row `i` of the stored `Q` block.
    #[inline]
    pub(crate) fn row(&self, i: usize) -> &[u8] {
        &self.bytes[i * P::PK_ROW_BYTES..(i + 1) * P::PK_ROW_BYTES]
    }
}

impl<P: ParameterSet> fmt::Debug for PublicKey<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({} bytes)", self.bytes.len())
    }
}

/// Secret decoding trapdoor, opaque to this crate apart from the fixed
/// offset at which the decoder's key material starts. Zeroed on drop; the
/// caller owns its long-term protection.
pub struct SecretKey<P: ParameterSet> {
    bytes: Box<[u8]>,
    _marker: PhantomData<P>,
}

impl<P: ParameterSet> SecretKey<P> {
    /// Validate and take ownership of a secret trapdoor blob.
    ///
    /// # Errors
    /// `InvalidArgument` if the blob is not exactly `SECRET_KEY_BYTES` long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != P::SECRET_KEY_BYTES {
            return Err(Error::InvalidArgument);
        }
        Ok(Self {
            bytes: bytes.into(),
            _marker: PhantomData,
        })
    }

    pub(crate) fn zeroed() -> Self {
        Self {
            bytes: vec![0u8; P::SECRET_KEY_BYTES].into_boxed_slice(),
            _marker: PhantomData,
        }
    }

    /// The raw trapdoor blob, `SECRET_KEY_BYTES` bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// The decoder's key material inside the blob, starting at
    /// `SK_DECODE_OFFSET`. Engines decode against this slice.
    pub fn decode_material(&self) -> &[u8] {
        &self.bytes[P::SK_DECODE_OFFSET..]
    }
}

impl<P: ParameterSet> Drop for SecretKey<P> {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl<P: ParameterSet> Clone for SecretKey<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
            _marker: PhantomData,
        }
    }
}

impl<P: ParameterSet> fmt::Debug for SecretKey<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print trapdoor bytes.
        write!(f, "SecretKey({} bytes)", self.bytes.len())
    }
}

/// Capability interface of the external code engine.
///
/// `keygen` and `decode` are the oracles the code-offset protocol needs;
/// `encaps`/`decaps` additionally serve the two non-fuzzy wrap flows. The
/// engine must be safe for concurrent invocation: all randomness arrives as
/// explicit seeds and no call may rely on unsynchronized global state.
pub trait CodeEngine<P: ParameterSet> {
    /// Generate a fresh keypair deterministically from `seed`.
    ///
    /// # Errors
    /// `KeygenFailure` if no valid keypair could be produced.
    fn keygen(&self, seed: &KeygenSeed) -> Result<(PublicKey<P>, SecretKey<P>)>;

    /// Find the unique error vector of weight <= t whose syndrome is `synd`.
    ///
    /// # Errors
    /// `DecodeFailure` if no such correction exists.
    fn decode(&self, sk: &SecretKey<P>, synd: &Syndrome<P>) -> Result<ErrorVect<P>>;

    /// Encapsulate a shared secret to `pk`, using `seed` as the only
    /// randomness source.
    fn encaps(&self, pk: &PublicKey<P>, seed: &EncapsSeed) -> Result<(Ciphertext<P>, SharedSecret)>;

    /// Recover the shared secret from `ct` under `sk`.
    ///
    /// # Errors
    /// `DecodeFailure` if the ciphertext is not decodable under `sk`.
    fn decaps(&self, sk: &SecretKey<P>, ct: &Ciphertext<P>) -> Result<SharedSecret>;
}
