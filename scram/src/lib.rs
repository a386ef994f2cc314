#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

//! # Structure
//!
//! The generic engine lives in [`kdf`] (PBKDF2 key stretching) and [`proofs`]
//! (the RFC 5802 derivation chain), both parameterized over any
//! [`digest::Digest`]. [`transcript`] assembles the immutable
//! authentication message the proofs are keyed on.
//!
//! The crate-root functions wrap the engine behind a runtime
//! [`DigestAlgorithm`] selector, for callers that negotiate the hash over
//! the wire (a SASL mechanism list) rather than choosing it at compile time:
//!
//! ```rust
//! use scram::{derive_salted_password, DigestAlgorithm};
//!
//! # fn main() -> scram::Result<()> {
//! let algorithm = DigestAlgorithm::from_mechanism_name("SCRAM-SHA-1")?;
//! let salted = derive_salted_password(algorithm, b"pencil", b"salt", 4096)?;
//! assert_eq!(salted.as_bytes().len(), algorithm.output_size());
//! # Ok(())
//! # }
//! ```

extern crate alloc;

pub mod kdf;
pub mod proofs;
pub mod transcript;

mod errors;

pub use crate::{
    errors::{Error, Result},
    proofs::{verify_server_signature, ScramProofs},
    transcript::{AuthMessage, Transcript},
};

use alloc::vec::Vec;
use core::fmt;

use digest::Digest;
use sha1::Sha1;
use sha2::{Sha256, Sha512};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Digest underlying the HMAC and PBKDF2 computations.
///
/// Selected explicitly per authentication attempt from the negotiated SASL
/// mechanism name; there is no process-wide default.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DigestAlgorithm {
    /// SHA-1, as used by `SCRAM-SHA-1` (RFC 5802).
    Sha1,
    /// SHA-256, as used by `SCRAM-SHA-256` (RFC 7677).
    Sha256,
    /// SHA-512, as used by `SCRAM-SHA-512`.
    Sha512,
}

impl DigestAlgorithm {
    /// Resolve a SASL mechanism name (or bare hash name) to a digest.
    ///
    /// Accepts spellings like `SCRAM-SHA-1`, `SCRAM-SHA-256-PLUS`, `SHA-1`
    /// or `sha1`, case-insensitively. An unrecognized name fails here, at
    /// mechanism-selection time, rather than on every subsequent call.
    pub fn from_mechanism_name(name: &str) -> Result<Self> {
        let name = name.trim();
        let name = strip_prefix_ignore_case(name, "SCRAM-").unwrap_or(name);
        let name = strip_suffix_ignore_case(name, "-PLUS").unwrap_or(name);

        if name.eq_ignore_ascii_case("SHA-1") || name.eq_ignore_ascii_case("SHA1") {
            Ok(DigestAlgorithm::Sha1)
        } else if name.eq_ignore_ascii_case("SHA-256") || name.eq_ignore_ascii_case("SHA256") {
            Ok(DigestAlgorithm::Sha256)
        } else if name.eq_ignore_ascii_case("SHA-512") || name.eq_ignore_ascii_case("SHA512") {
            Ok(DigestAlgorithm::Sha512)
        } else {
            Err(Error::UnsupportedDigest)
        }
    }

    /// Output size of the digest in bytes; every derived key and proof this
    /// crate produces for the algorithm has exactly this length.
    pub fn output_size(self) -> usize {
        match self {
            DigestAlgorithm::Sha1 => Sha1::output_size(),
            DigestAlgorithm::Sha256 => Sha256::output_size(),
            DigestAlgorithm::Sha512 => Sha512::output_size(),
        }
    }
}

fn strip_prefix_ignore_case<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    name.get(..prefix.len())
        .filter(|head| head.eq_ignore_ascii_case(prefix))
        .map(|_| &name[prefix.len()..])
}

fn strip_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    name.len()
        .checked_sub(suffix.len())
        .and_then(|mid| name.get(mid..).map(|tail| (mid, tail)))
        .filter(|(_, tail)| tail.eq_ignore_ascii_case(suffix))
        .map(|(mid, _)| &name[..mid])
}

/// PBKDF2-derived root key for one authentication attempt.
///
/// Holds secret key material: the buffer is wiped on drop when the
/// `zeroize` feature is enabled, and the `Debug` impl never prints it.
#[derive(Clone)]
pub struct SaltedPassword {
    bytes: Vec<u8>,
}

impl SaltedPassword {
    /// The derived key bytes, one digest output long.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for SaltedPassword {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for SaltedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SaltedPassword(..)")
    }
}

#[cfg(feature = "zeroize")]
impl Drop for SaltedPassword {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::ZeroizeOnDrop for SaltedPassword {}

/// Client proof and expected server signature for one authentication
/// attempt, with the digest erased (see [`ScramProofs`] for the generic
/// equivalent).
#[derive(Clone, Eq, PartialEq)]
pub struct Proofs {
    client_proof: Vec<u8>,
    server_signature: Vec<u8>,
}

impl Proofs {
    /// Proof to embed in the client-final-message (`p=` attribute, before
    /// base64 encoding).
    pub fn client_proof(&self) -> &[u8] {
        &self.client_proof
    }

    /// Signature the server's final message must carry (`v=` attribute,
    /// before base64 encoding); check it with [`verify_server_signature`].
    pub fn server_signature(&self) -> &[u8] {
        &self.server_signature
    }
}

impl fmt::Debug for Proofs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Proofs(..)")
    }
}

/// Derive the salted password for `algorithm`.
///
/// Recomputed per authentication attempt; no caching happens inside the
/// crate.
pub fn derive_salted_password(
    algorithm: DigestAlgorithm,
    password: &[u8],
    salt: &[u8],
    iterations: u32,
) -> Result<SaltedPassword> {
    let bytes = match algorithm {
        DigestAlgorithm::Sha1 => {
            kdf::derive_salted_password::<Sha1>(password, salt, iterations)?.to_vec()
        }
        DigestAlgorithm::Sha256 => {
            kdf::derive_salted_password::<Sha256>(password, salt, iterations)?.to_vec()
        }
        DigestAlgorithm::Sha512 => {
            kdf::derive_salted_password::<Sha512>(password, salt, iterations)?.to_vec()
        }
    };
    Ok(SaltedPassword { bytes })
}

/// Derive the client proof and server signature for `algorithm` in one call.
pub fn compute_proofs(
    algorithm: DigestAlgorithm,
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    auth_message: &AuthMessage,
) -> Result<Proofs> {
    match algorithm {
        DigestAlgorithm::Sha1 => {
            let p = proofs::compute_proofs::<Sha1>(password, salt, iterations, auth_message)?;
            Ok(Proofs {
                client_proof: p.client_proof.to_vec(),
                server_signature: p.server_signature.to_vec(),
            })
        }
        DigestAlgorithm::Sha256 => {
            let p = proofs::compute_proofs::<Sha256>(password, salt, iterations, auth_message)?;
            Ok(Proofs {
                client_proof: p.client_proof.to_vec(),
                server_signature: p.server_signature.to_vec(),
            })
        }
        DigestAlgorithm::Sha512 => {
            let p = proofs::compute_proofs::<Sha512>(password, salt, iterations, auth_message)?;
            Ok(Proofs {
                client_proof: p.client_proof.to_vec(),
                server_signature: p.server_signature.to_vec(),
            })
        }
    }
}
