//! End-to-end SCRAM proof vectors: the XMPP SHA-1 exchange fixture plus the
//! RFC 5802 / RFC 7677 "pencil" vectors, and server-signature verification
//! behavior.

use hex_literal::hex;
use sha1::Sha1;
use sha2::Sha256;

use scram::proofs::{
    client_key, client_proof, client_signature, compute_proofs, server_key, server_signature,
    stored_key,
};
use scram::{verify_server_signature, AuthMessage, DigestAlgorithm, Error};

/// Transcript from a `SCRAM-SHA-1` exchange for `username@jabber.org`,
/// password "password", salt "salt" (`s=c2FsdA==`), one iteration.
const JABBER_AUTH_MESSAGE: &[u8] =
    b"n=username@jabber.org,r=8jLxB5515dhFxBil5A0xSXMH,r=8jLxB5515dhFxBil5A0xSXMHabc,\
      s=c2FsdA==,i=1,c=biws,r=8jLxB5515dhFxBil5A0xSXMHabc";

#[test]
fn jabber_sha1_client_proof() {
    let auth_message = AuthMessage::from_bytes(JABBER_AUTH_MESSAGE).unwrap();
    let proofs =
        scram::compute_proofs(DigestAlgorithm::Sha1, b"password", b"salt", 1, &auth_message)
            .unwrap();
    assert_eq!(
        proofs.client_proof(),
        hex!("486130a5610baeb9e411a8fda5cd341d8a3c2817")
    );
    assert_eq!(
        proofs.server_signature(),
        hex!("e6af3e264dda10be3aa50d0e4ec6e5ce85d4e880")
    );
}

#[test]
fn rfc5802_sha1_pencil_vector() {
    let auth_message = AuthMessage::from_parts(
        b"n=user,r=fyko+d2lbbFgONRv9qkxdawL",
        b"r=fyko+d2lbbFgONRv9qkxdawL3rfcNHYJY1ZVvWVs7j,s=QSXCR+Q6sek8bf92,i=4096",
        b"c=biws,r=fyko+d2lbbFgONRv9qkxdawL3rfcNHYJY1ZVvWVs7j",
    )
    .unwrap();

    // Salt is base64 "QSXCR+Q6sek8bf92" on the wire.
    let salt = hex!("4125c247e43ab1e93c6dff76");
    let proofs = compute_proofs::<Sha1>(b"pencil", &salt, 4096, &auth_message).unwrap();

    // b64("v0X8v3Bz2T0CJGbJQyF0X+HI4Ts=") and b64("rmF9pqV8S7suAoZWja4dJRkFsKQ=")
    assert_eq!(
        proofs.client_proof.as_slice(),
        hex!("bf45fcbf7073d93d022466c94321745fe1c8e13b")
    );
    assert_eq!(
        proofs.server_signature.as_slice(),
        hex!("ae617da6a57c4bbb2e0286568dae1d251905b0a4")
    );
}

#[test]
fn rfc7677_sha256_pencil_vector() {
    let auth_message = AuthMessage::from_parts(
        b"n=user,r=rOprNGfwEbeRWgbNEkqO",
        b"r=rOprNGfwEbeRWgbNEkqO%hvYDpWUa2RaTCAfuxFIlj)hNlF$k0,s=W22ZaJ0SNY7soEsUEjb6gQ==,i=4096",
        b"c=biws,r=rOprNGfwEbeRWgbNEkqO%hvYDpWUa2RaTCAfuxFIlj)hNlF$k0",
    )
    .unwrap();

    // Salt is base64 "W22ZaJ0SNY7soEsUEjb6gQ==" on the wire.
    let salt = hex!("5b6d99689d12358eeca04b141236fa81");
    let proofs = compute_proofs::<Sha256>(b"pencil", &salt, 4096, &auth_message).unwrap();

    // b64("dHzbZapWIk4jUhN+Ute9ytag9zjfMHgsqmmiz7AndVQ=")
    assert_eq!(
        proofs.client_proof.as_slice(),
        hex!("747cdb65aa56224e2352137e52d7bdcad6a0f738df30782caa69a2cfb0277554")
    );
    // b64("6rriTRBi23WpRR/wtup+mMhUZUn/dB5nLTJRsjl95G4=")
    assert_eq!(
        proofs.server_signature.as_slice(),
        hex!("eabae24d1062db75a9451ff0b6ea7e98c8546549ff741e672d3251b2397de46e")
    );
}

#[test]
fn proof_xor_inverts_to_client_key() {
    // The server-side check: XOR the received proof with the locally
    // computed signature to recover ClientKey, then confirm its hash
    // matches StoredKey.
    let auth_message = AuthMessage::from_bytes(JABBER_AUTH_MESSAGE).unwrap();
    let salted = scram::kdf::derive_salted_password::<Sha1>(b"password", b"salt", 1).unwrap();

    let ck = client_key::<Sha1>(&salted);
    let sk = stored_key::<Sha1>(&ck);
    let sig = client_signature::<Sha1>(&sk, auth_message.as_bytes());
    let proof = client_proof::<Sha1>(&ck, &sig);

    let recovered = client_proof::<Sha1>(&proof, &sig);
    assert_eq!(recovered, ck);
    assert_eq!(stored_key::<Sha1>(&recovered), sk);
}

#[test]
fn composed_and_stepwise_derivations_agree() {
    let auth_message = AuthMessage::from_bytes(JABBER_AUTH_MESSAGE).unwrap();
    let salted = scram::kdf::derive_salted_password::<Sha1>(b"password", b"salt", 1).unwrap();

    let ck = client_key::<Sha1>(&salted);
    let sk = stored_key::<Sha1>(&ck);
    let csig = client_signature::<Sha1>(&sk, auth_message.as_bytes());
    let srvk = server_key::<Sha1>(&salted);

    let composed = compute_proofs::<Sha1>(b"password", b"salt", 1, &auth_message).unwrap();
    assert_eq!(composed.client_proof, client_proof::<Sha1>(&ck, &csig));
    assert_eq!(
        composed.server_signature,
        server_signature::<Sha1>(&srvk, auth_message.as_bytes())
    );
}

#[test]
fn compute_proofs_is_idempotent() {
    let auth_message = AuthMessage::from_bytes(JABBER_AUTH_MESSAGE).unwrap();
    let first =
        scram::compute_proofs(DigestAlgorithm::Sha1, b"password", b"salt", 1, &auth_message)
            .unwrap();
    let second =
        scram::compute_proofs(DigestAlgorithm::Sha1, b"password", b"salt", 1, &auth_message)
            .unwrap();
    assert_eq!(first, second);
}

#[test]
fn zero_iterations_rejected() {
    let auth_message = AuthMessage::from_bytes(JABBER_AUTH_MESSAGE).unwrap();
    assert!(matches!(
        scram::compute_proofs(DigestAlgorithm::Sha1, b"password", b"salt", 0, &auth_message),
        Err(Error::InvalidIterationCount)
    ));
}

#[test]
fn server_signature_verification() {
    let good = hex!("e6af3e264dda10be3aa50d0e4ec6e5ce85d4e880");
    assert!(verify_server_signature(&good, &good));

    // Flip one byte at each position.
    for i in 0..good.len() {
        let mut bad = good;
        bad[i] ^= 0x01;
        assert!(!verify_server_signature(&good, &bad), "byte {i}");
    }

    // Length mismatch, including a matching prefix.
    assert!(!verify_server_signature(&good, &good[..19]));
    assert!(!verify_server_signature(&good, b""));
}
