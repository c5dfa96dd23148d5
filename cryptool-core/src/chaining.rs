// File:    chaining.rs
// Author:  apezoo
// Date:    2026-10-16
//
// Description: AES-256 in CBC mode, framed by the crate's own padding codec.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::NoPadding};

use crate::error::{CryptoError, CryptoResult};
use crate::key_material::KeyMaterial;
use crate::padding::{self, AES_BLOCK_SIZE};
use crate::primitive::{Auxiliary, Operation, Payload, Primitive, PrimitiveOutput};

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;
/// CBC IV length in bytes (one AES block).
pub const IV_LEN: usize = AES_BLOCK_SIZE;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

fn check_lengths(key: &[u8], iv: &[u8]) -> CryptoResult<()> {
    if key.len() != KEY_LEN {
        return Err(CryptoError::InvalidKeyLength {
            what: "key",
            expected: KEY_LEN,
            actual: key.len(),
        });
    }
    if iv.len() != IV_LEN {
        return Err(CryptoError::InvalidKeyLength {
            what: "iv",
            expected: IV_LEN,
            actual: iv.len(),
        });
    }
    Ok(())
}

/// Pads `plaintext` and encrypts it with AES-256-CBC.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidKeyLength`] if `key` is not 32 bytes or
/// `iv` is not 16 bytes.
pub fn encrypt(key: &[u8], iv: &[u8], plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
    check_lengths(key, iv)?;
    let padded = padding::pad(plaintext, AES_BLOCK_SIZE);
    let cipher = Aes256CbcEnc::new_from_slices(key, iv)
        .map_err(|e| CryptoError::PrimitiveFailure(e.to_string()))?;
    Ok(cipher.encrypt_padded_vec_mut::<NoPadding>(&padded))
}

/// Decrypts AES-256-CBC `ciphertext` and strips its padding.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidKeyLength`] for bad key or IV sizes and
/// [`CryptoError::InvalidPadding`] if the ciphertext is not whole blocks or
/// the recovered padding is malformed.
pub fn decrypt(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> CryptoResult<Vec<u8>> {
    check_lengths(key, iv)?;
    let cipher = Aes256CbcDec::new_from_slices(key, iv)
        .map_err(|e| CryptoError::PrimitiveFailure(e.to_string()))?;
    let padded = cipher
        .decrypt_padded_vec_mut::<NoPadding>(ciphertext)
        .map_err(|_| CryptoError::InvalidPadding)?;
    Ok(padding::unpad(&padded, AES_BLOCK_SIZE)?.to_vec())
}

/// CBC encryption under a fresh key and IV.
#[derive(Debug, Clone, Copy, Default)]
pub struct AesCbc;

impl Primitive for AesCbc {
    fn operation(&self) -> Operation {
        Operation::BlockCipherCbc
    }

    fn label(&self) -> String {
        "AES-256-CBC".to_string()
    }

    fn invoke(&self, input: &[u8]) -> CryptoResult<PrimitiveOutput> {
        let material = KeyMaterial::generate(KEY_LEN, IV_LEN)?;
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
