// File:    aead.rs
// Author:  apezoo
// Date:    2026-10-16
//
// Description: AES-256-GCM authenticated encryption.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit},
};

use crate::error::{CryptoError, CryptoResult};
use crate::key_material::KeyMaterial;
use crate::primitive::{Auxiliary, Operation, Payload, Primitive, PrimitiveOutput};

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;
/// GCM nonce length in bytes (96 bits).
pub const NONCE_LEN: usize = 12;
/// Length of the authentication tag appended to every ciphertext.
pub const TAG_LEN: usize = 16;

fn cipher_for(key: &[u8], nonce: &[u8]) -> CryptoResult<Aes256Gcm> {
    if nonce.len() != NONCE_LEN {
        return Err(CryptoError::InvalidKeyLength {
            what: "nonce",
            expected: NONCE_LEN,
            actual: nonce.len(),
        });
    }
    Aes256Gcm::new_from_slice(key).map_err(|_| CryptoError::InvalidKeyLength {
        what: "key",
        expected: KEY_LEN,
        actual: key.len(),
    })
}

/// Encrypts `plaintext`, returning the ciphertext with the tag appended.
///
/// The caller must never reuse a nonce under the same key.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidKeyLength`] for a bad key or nonce size.
pub fn encrypt(key: &[u8], nonce: &[u8], plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
    let cipher = cipher_for(key, nonce)?;
    cipher
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .map_err(|e| CryptoError::PrimitiveFailure(e.to_string()))
}

/// Verifies the tag and decrypts `ciphertext`.
///
/// # Errors
///
/// Returns [`CryptoError::AuthenticationFailed`] if the ciphertext, tag,
/// key or nonce do not match.
pub fn decrypt(key: &[u8], nonce: &[u8], ciphertext: &[u8]) -> CryptoResult<Vec<u8>> {
    let cipher = cipher_for(key, nonce)?;
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| CryptoError::AuthenticationFailed)
}

/// GCM encryption under a fresh key and nonce.
#[derive(Debug, Clone, Copy, Default)]
pub struct AesGcm;

impl Primitive for AesGcm {
    fn operation(&self) -> Operation {
        Operation::AeadGcm
    }

    fn label(&self) -> String {
        "AES-256-GCM".to_string()
    }

    fn invoke(&self, input: &[u8]) -> CryptoResult<PrimitiveOutput> {
        let material = KeyMaterial::generate(KEY_LEN, NONCE_LEN)?;
        let ciphertext = encrypt(material.key(), material.iv(), input)?;
        Ok(PrimitiveOutput {
            payload: Payload::Ciphertext(ciphertext),
            auxiliary: Auxiliary {
                iv: Some(material.iv().to_vec()),
                ..Auxiliary::default()
            },
        })
    }
}
