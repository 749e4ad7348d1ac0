//! SHAKE256 plumbing: the key derivation function and a domain-separated
//! XOF used wherever deterministic expansion of a seed is needed.
//!
//! The KDF is intentionally bare: `SHAKE256(v)` truncated from the front,
//! with no salt and no context separation. Identical input vectors always
//! yield identical output across all calls and parameter sets. This makes
//! the derived key a deterministic function of the mapped reading alone,
//! which in turn makes independent enrollments of the same reading linkable
//! by key equality; that is a property of the construction, kept as is.

use hybrid_array::{Array, typenum::U32};
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Shake256, Shake256Reader};

/// Maximum number of key bytes the KDF can supply per derivation.
pub const KDF_MAX_BYTES: usize = 32;

/// Full (pre-truncation) KDF expansion. Sensitive: callers erase it once the
/// requested prefix has been copied out.
pub(crate) type KdfOutput = Array<u8, U32>;

/// Derive the full KDF expansion of a bit vector.
pub(crate) fn kdf(v: &[u8]) -> KdfOutput {
    let mut hasher = Shake256::default();
    hasher.update(v);
    let mut out = KdfOutput::default();
    hasher.finalize_xof().read(out.as_mut_slice());
    out
}

/// Domain tag for expanding a keygen seed into a public code description.
pub(crate) const PK_DOMAIN_SEP: u8 = 1;
/// Domain tag for deriving an encapsulation ciphertext from an encaps seed.
pub(crate) const CT_DOMAIN_SEP: u8 = 2;
/// Domain tag for deriving a shared secret from key material and ciphertext.
pub(crate) const SS_DOMAIN_SEP: u8 = 3;

/// Incremental SHAKE256 reader seeded with `seed || domain_sep`.
pub(crate) struct Xof {
    reader: Shake256Reader,
}

impl Xof {
    pub(crate) fn init(seed: &[u8], domain_sep: u8) -> Self {
        let mut hasher = Shake256::default();
        hasher.update(seed);
        hasher.update(&[domain_sep]);
        Self {
            reader: hasher.finalize_xof(),
        }
    }

    /// Absorb-nothing variant that squeezes further output bytes.
    pub(crate) fn squeeze(&mut self, out: &mut [u8]) {
        self.reader.read(out);
    }
}
