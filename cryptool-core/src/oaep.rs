// File:    oaep.rs
// Author:  apezoo
// Date:    2026-10-16
//
// Description: RSA encryption with OAEP/SHA-256 padding under a freshly generated key pair.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use std::time::Instant;

use rand_core::OsRng;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey, traits::PublicKeyParts};
use sha2::Sha256;

use crate::error::{CryptoError, CryptoResult};
use crate::primitive::{Auxiliary, Operation, Payload, Primitive, PrimitiveOutput};

/// Modulus size used unless configured otherwise.
pub const DEFAULT_KEY_BITS: usize = 2048;
/// Output length of the OAEP hash (SHA-256).
pub const HASH_LEN: usize = 32;

/// Largest plaintext OAEP can carry for a modulus of `modulus_bytes` bytes.
///
/// For a 2048-bit key this is `256 - 2 * 32 - 2 = 190`.
#[must_use]
pub const fn max_plaintext_len(modulus_bytes: usize) -> usize {
    modulus_bytes.saturating_sub(2 * HASH_LEN + 2)
}

/// Generates an RSA private key with a `bits`-bit modulus.
///
/// # Errors
///
/// Returns [`CryptoError::KeyGenerationFailed`] if the key cannot be generated.
pub fn generate_key(bits: usize) -> CryptoResult<RsaPrivateKey> {
    RsaPrivateKey::new(&mut OsRng, bits).map_err(|e| CryptoError::KeyGenerationFailed(e.to_string()))
}

/// Encrypts `plaintext` for `public_key` with OAEP/SHA-256.
///
/// # Errors
///
/// Returns [`CryptoError::PreconditionViolated`] if `plaintext` is longer
/// than [`max_plaintext_len`] allows for this key.
pub fn encrypt(public_key: &RsaPublicKey, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
    let limit = max_plaintext_len(public_key.size());
    if plaintext.len() > limit {
        return Err(CryptoError::PreconditionViolated {
            algorithm: format!("RSA-{}", public_key.size() * 8),
            limit,
            actual: plaintext.len(),
        });
    }
    public_key
        .encrypt(&mut OsRng, Oaep::new::<Sha256>(), plaintext)
        .map_err(|e| CryptoError::PrimitiveFailure(e.to_string()))
}

/// Decrypts an OAEP/SHA-256 ciphertext.
///
/// # Errors
///
/// Returns [`CryptoError::PrimitiveFailure`] if the ciphertext does not
/// decrypt under `private_key`.
pub fn decrypt(private_key: &RsaPrivateKey, ciphertext: &[u8]) -> CryptoResult<Vec<u8>> {
    private_key
        .decrypt(Oaep::new::<Sha256>(), ciphertext)
        .map_err(|e| CryptoError::PrimitiveFailure(e.to_string()))
}

/// OAEP encryption under a key pair generated for the single call.
#[derive(Debug, Clone, Copy)]
pub struct RsaOaep {
    key_bits: usize,
}

impl RsaOaep {
    /// A primitive generating `key_bits`-bit keys.
    #[must_use]
    pub const fn new(key_bits: usize) -> Self {
        Self { key_bits }
    }
}

impl Default for RsaOaep {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_BITS)
    }
}

impl Primitive for RsaOaep {
    fn operation(&self) -> Operation {
        Operation::AsymmetricOaep
    }

    fn label(&self) -> String {
        format!("RSA-{}", self.key_bits)
    }

    fn max_input_len(&self) -> Option<usize> {
        Some(max_plaintext_len(self.key_bits.div_ceil(8)))
    }

    fn invoke(&self, input: &[u8]) -> CryptoResult<PrimitiveOutput> {
        let started = Instant::now();
        let private_key = generate_key(self.key_bits)?;
        let public_key = RsaPublicKey::from(&private_key);
        let keygen_time = started.elapsed();

        let ciphertext = encrypt(&public_key, input)?;
        Ok(PrimitiveOutput {
            payload: Payload::Ciphertext(ciphertext),
            auxiliary: Auxiliary {
                keygen_time: Some(keygen_time),
                ..Auxiliary::default()
            },
        })
    }
}
