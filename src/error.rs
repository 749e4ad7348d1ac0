//! Error taxonomy for the extractor.
//!
//! Every failure is an explicit result value; there is no partial-success
//! state and no internal retry. `DecodeFailure` in particular is the
//! expected rejection path for a probe reading too far from the enrollment,
//! not an exceptional condition.

/// Errors surfaced by the protocol and the code-engine seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Absent buffer, wrong buffer length, or a requested key length of 0
    /// or beyond the KDF maximum. Detected before any cryptographic work.
    InvalidArgument,
    /// The external keygen could not produce a valid keypair. Fatal to the
    /// enrollment call; propagated, never retried.
    KeygenFailure,
    /// Malformed public code description at the syndrome-engine layer.
    /// Should not occur with correctly generated keys.
    EncodeFailure,
    /// The external decoder found no correction of weight <= t. This is how
    /// a non-matching probe is rejected.
    DecodeFailure,
}

/// Shorthand result over [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidArgument => write!(f, "invalid argument (buffer or key length)"),
            Error::KeygenFailure => write!(f, "external keygen failed"),
            Error::EncodeFailure => write!(f, "malformed public code description"),
            Error::DecodeFailure => write!(f, "no correction of weight <= t exists"),
        }
    }
}

impl core::error::Error for Error {}
