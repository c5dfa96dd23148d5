// File:    key_material.rs
// Author:  apezoo
// Date:    2026-10-16
//
// Description: Generates fresh per-operation keys and initialization vectors from the OS random source.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use std::fmt;

use rand::{TryRngCore, rngs::OsRng};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CryptoError, CryptoResult};

/// A key and IV pair owned by a single operation.
///
/// The bytes are wiped when the value is dropped and never appear in the
/// `Debug` output. The type is not `Clone`:
///
/// ```compile_fail
/// use cryptool_core::key_material::KeyMaterial;
///
/// let material = KeyMaterial::generate(32, 16).unwrap();
/// let copy = material.clone();
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    key: Vec<u8>,
    iv: Vec<u8>,
}

impl KeyMaterial {
    /// Generates a random key of `key_bytes` bytes and IV of `iv_bytes` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::KeyGenerationFailed`] if the operating system
    /// random source cannot be read.
    pub fn generate(key_bytes: usize, iv_bytes: usize) -> CryptoResult<Self> {
        Ok(Self {
            key: random_bytes(key_bytes)?,
            iv: random_bytes(iv_bytes)?,
        })
    }

    /// The secret key.
    #[must_use]
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// The initialization vector (or nonce).
    #[must_use]
    pub fn iv(&self) -> &[u8] {
        &self.iv
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("key_len", &self.key.len())
            .field("iv_len", &self.iv.len())
            .finish()
    }
}

/// Fills a new buffer of `len` bytes from the operating system CSPRNG.
///
/// # Errors
///
/// Returns [`CryptoError::KeyGenerationFailed`] if the random source fails.
pub fn random_bytes(len: usize) -> CryptoResult<Vec<u8>> {
    let mut buffer = vec![0u8; len];
    OsRng
        .try_fill_bytes(&mut buffer)
        .map_err(|e| CryptoError::KeyGenerationFailed(e.to_string()))?;
    Ok(buffer)
}
