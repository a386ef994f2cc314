//! SCRAM proof computation.
//!
//! All derivations from [RFC 5802, section 3]: the salted password is the
//! root of an HMAC chain that produces the client proof sent on the wire and
//! the server signature checked on receipt. The individual steps are exposed
//! for server-side use (a server stores `StoredKey`/`ServerKey` rather than
//! the password), [`compute_proofs`] composes them for the client side.
//!
//! [RFC 5802, section 3]: https://datatracker.ietf.org/doc/html/rfc5802#section-3

use digest::{core_api::BlockSizeUser, Digest, Output};
use hmac::{Mac, SimpleHmac};
use subtle::ConstantTimeEq;

use crate::{errors::Result, kdf, transcript::AuthMessage};

/// ASCII literal keyed into the client-key HMAC, fixed by RFC 5802.
const CLIENT_KEY_LITERAL: &[u8] = b"Client Key";

/// ASCII literal keyed into the server-key HMAC, fixed by RFC 5802.
const SERVER_KEY_LITERAL: &[u8] = b"Server Key";

fn prf<D>(key: &[u8], message: &[u8]) -> Output<D>
where
    D: Digest + BlockSizeUser,
{
    SimpleHmac::<D>::new_from_slice(key)
        .expect("HMAC can take a key of any size")
        .chain_update(message)
        .finalize()
        .into_bytes()
}

/// `ClientKey = HMAC(SaltedPassword, "Client Key")`
pub fn client_key<D>(salted_password: &[u8]) -> Output<D>
where
    D: Digest + BlockSizeUser,
{
    prf::<D>(salted_password, CLIENT_KEY_LITERAL)
}

/// `StoredKey = H(ClientKey)` — a plain digest, not an HMAC.
pub fn stored_key<D: Digest>(client_key: &[u8]) -> Output<D> {
    D::digest(client_key)
}

/// `ClientSignature = HMAC(StoredKey, AuthMessage)`
pub fn client_signature<D>(stored_key: &[u8], auth_message: &[u8]) -> Output<D>
where
    D: Digest + BlockSizeUser,
{
    prf::<D>(stored_key, auth_message)
}

/// `ClientProof = ClientKey XOR ClientSignature`
pub fn client_proof<D: Digest>(
    client_key: &Output<D>,
    client_signature: &Output<D>,
) -> Output<D> {
    let mut proof = client_key.clone();
    for (byte, mask) in proof.iter_mut().zip(client_signature) {
        *byte ^= mask;
    }
    proof
}

/// `ServerKey = HMAC(SaltedPassword, "Server Key")`
pub fn server_key<D>(salted_password: &[u8]) -> Output<D>
where
    D: Digest + BlockSizeUser,
{
    prf::<D>(salted_password, SERVER_KEY_LITERAL)
}

/// `ServerSignature = HMAC(ServerKey, AuthMessage)`
pub fn server_signature<D>(server_key: &[u8], auth_message: &[u8]) -> Output<D>
where
    D: Digest + BlockSizeUser,
{
    prf::<D>(server_key, auth_message)
}

/// Client proof and expected server signature for one authentication attempt.
#[derive(Clone)]
pub struct ScramProofs<D: Digest> {
    /// Proof to embed in the client-final-message.
    pub client_proof: Output<D>,
    /// Signature the server's final message must carry.
    pub server_signature: Output<D>,
}

/// Derive the salted password and both proofs in one call.
///
/// The transcript is taken as a finalized [`AuthMessage`] so it cannot
/// change between the two signature computations.
pub fn compute_proofs<D>(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    auth_message: &AuthMessage,
) -> Result<ScramProofs<D>>
where
    D: Digest + BlockSizeUser + Clone,
{
    let salted_password = kdf::derive_salted_password::<D>(password, salt, iterations)?;

    let client_key = client_key::<D>(&salted_password);
    let stored_key = stored_key::<D>(&client_key);
    let client_signature = client_signature::<D>(&stored_key, auth_message.as_bytes());
    let client_proof = client_proof::<D>(&client_key, &client_signature);

    let server_key = server_key::<D>(&salted_password);
    let server_signature = server_signature::<D>(&server_key, auth_message.as_bytes());

    Ok(ScramProofs {
        client_proof,
        server_signature,
    })
}

/// Compare a computed server signature against the one received on the wire.
///
/// Constant-time: the comparison never exits early on the first differing
/// byte. Returns `false` on any difference, including a length mismatch.
#[must_use]
pub fn verify_server_signature(computed: &[u8], received: &[u8]) -> bool {
    computed.ct_eq(received).unwrap_u8() == 1
}
