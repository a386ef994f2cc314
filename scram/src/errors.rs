//! Error types.

use core::{error, fmt};

/// [`Result`][`core::result::Result`] type with `scram`'s [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// SCRAM credential-derivation errors.
///
/// Every variant is a precondition or configuration failure reported to the
/// calling session layer; none is fatal to the process. The session layer is
/// expected to abort the current authentication attempt.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// Iteration count below the PBKDF2 minimum of 1.
    InvalidIterationCount,

    /// The negotiated mechanism names a digest this crate does not provide.
    UnsupportedDigest,

    /// The authentication message is empty; SCRAM never defines proofs over
    /// an empty transcript.
    EmptyTranscript,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidIterationCount => f.write_str("iteration count must be at least 1"),
            Error::UnsupportedDigest => f.write_str("unsupported digest algorithm"),
            Error::EmptyTranscript => f.write_str("empty authentication message"),
        }
    }
}

impl error::Error for Error {}
