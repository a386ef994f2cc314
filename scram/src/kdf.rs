//! PBKDF2 key stretching.
//!
//! SCRAM only ever needs a single PBKDF2 block: the derived key is exactly
//! one digest output long, so the block-index suffix is always `INT(1)` and
//! no output truncation is supported.

use digest::{core_api::BlockSizeUser, Digest, Output};
use hmac::{Mac, SimpleHmac};

use crate::errors::{Error, Result};

/// Stretch `password` into a digest-sized salted key ("SaltedPassword").
///
/// Computes `U1 = HMAC(password, salt || INT(1))`,
/// `U_i = HMAC(password, U_{i-1})` and returns the XOR of every `U_i`.
/// Zero-length passwords and salts are valid inputs; an iteration count
/// below 1 is rejected with [`Error::InvalidIterationCount`].
pub fn derive_salted_password<D>(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
) -> Result<Output<D>>
where
    D: Digest + BlockSizeUser + Clone,
{
    if iterations < 1 {
        return Err(Error::InvalidIterationCount);
    }

    let prf =
        SimpleHmac::<D>::new_from_slice(password).expect("HMAC can take a key of any size");

    // U1 = HMAC(password, salt || INT(1))
    let mut u = prf
        .clone()
        .chain_update(salt)
        .chain_update(1u32.to_be_bytes())
        .finalize()
        .into_bytes();
    let mut salted = u.clone();

    // U_i = HMAC(password, U_{i-1}), XOR-accumulated into the result.
    // Starts past U1 so that iterations = 1 leaves `salted` untouched.
    for _ in 1..iterations {
        u = prf.clone().chain_update(&u).finalize().into_bytes();
        for (acc, byte) in salted.iter_mut().zip(&u) {
            *acc ^= byte;
        }
    }

    Ok(salted)
}
