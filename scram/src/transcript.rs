//! Authentication-message bookkeeping.
//!
//! Both proof computations are keyed on the same transcript of handshake
//! fragments; if the two sides disagree on a single byte of it, the proofs
//! diverge and authentication fails. [`AuthMessage`] is deliberately
//! immutable once built so the transcript cannot drift between the client
//! signature and the server signature.

use alloc::vec::Vec;

use crate::errors::{Error, Result};

/// The three handshake fragments both sides sign.
///
/// The SASL message-framing layer owns the fragment buffers; this struct
/// just borrows them long enough to assemble the [`AuthMessage`].
#[derive(Copy, Clone, Debug)]
pub struct Transcript<'a> {
    /// `client-first-message-bare`: the client's first message without the
    /// GS2 channel-binding prefix.
    pub client_first_bare: &'a [u8],
    /// `server-first-message`: the server's nonce/salt/iteration challenge.
    pub server_first: &'a [u8],
    /// `client-final-message-without-proof`: the client's final message up
    /// to, but not including, the `,p=` proof attribute.
    pub client_final_without_proof: &'a [u8],
}

impl Transcript<'_> {
    /// Assemble the fragments into a finalized [`AuthMessage`].
    pub fn auth_message(&self) -> Result<AuthMessage> {
        let mut bytes = Vec::with_capacity(
            self.client_first_bare.len()
                + self.server_first.len()
                + self.client_final_without_proof.len()
                + 2,
        );
        bytes.extend_from_slice(self.client_first_bare);
        bytes.push(b',');
        bytes.extend_from_slice(self.server_first);
        bytes.push(b',');
        bytes.extend_from_slice(self.client_final_without_proof);
        AuthMessage::from_bytes(bytes)
    }
}

/// Finalized `AuthMessage`: the comma-joined transcript keyed into both
/// signature HMACs.
///
/// Construction is the only way to set the contents, which enforces the
/// SCRAM requirement that the transcript not change once proofs have been
/// computed over it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthMessage {
    bytes: Vec<u8>,
}

impl AuthMessage {
    /// Build the message from the three transcript fragments.
    pub fn from_parts(
        client_first_bare: &[u8],
        server_first: &[u8],
        client_final_without_proof: &[u8],
    ) -> Result<Self> {
        Transcript {
            client_first_bare,
            server_first,
            client_final_without_proof,
        }
        .auth_message()
    }

    /// Wrap an already-joined transcript.
    ///
    /// Rejects an empty byte string: SCRAM never defines proofs over an
    /// empty transcript.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(Error::EmptyTranscript);
        }
        Ok(Self { bytes })
    }

    /// The raw message bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for AuthMessage {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
