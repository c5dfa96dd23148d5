// File:    hashing.rs
// Author:  apezoo
// Date:    2026-10-16
//
// Description: SHA-256 digests.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use sha2::{Digest, Sha256};

use crate::error::CryptoResult;
use crate::primitive::{Operation, Payload, Primitive, PrimitiveOutput};

/// Digest length of SHA-256 in bytes.
pub const DIGEST_LEN: usize = 32;

/// Computes the SHA-256 digest of `data`.
#[must_use]
pub fn sha256(data: &[u8]) -> Vec<u8> {
    Sha256::digest(data).to_vec()
}

/// SHA-256 over the whole input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hash;

impl Primitive for Sha256Hash {
    fn operation(&self) -> Operation {
        Operation::Hash
    }

    fn label(&self) -> String {
        "SHA-256".to_string()
    }

    fn invoke(&self, input: &[u8]) -> CryptoResult<PrimitiveOutput> {
        Ok(PrimitiveOutput::new(Payload::Digest(sha256(input))))
    }
}
