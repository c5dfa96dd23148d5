// File:    padding.rs
// Author:  apezoo
// Date:    2026-10-16
//
// Description: Trailing-count byte padding used to frame plaintext for block ciphers in chaining mode.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Block padding codec.
//!
//! `pad` always appends between 1 and `block_size` bytes, each holding the
//! pad length. An input that is already aligned receives a whole extra
//! block, so `unpad` can always tell where the plaintext ends.

use crate::error::{CryptoError, CryptoResult};

/// Block size of AES in bytes.
pub const AES_BLOCK_SIZE: usize = 16;

fn check_block_size(block_size: usize) {
    assert!(
        (1..=255).contains(&block_size),
        "Block size must be between 1 and 255 bytes, got {block_size}."
    );
}

/// Pads `data` up to the next multiple of `block_size`.
///
/// The result is always strictly longer than `data`.
///
/// # Panics
///
/// Panics if `block_size` is 0 or larger than 255, since the pad length
/// must fit in a single byte.
#[must_use]
pub fn pad(data: &[u8], block_size: usize) -> Vec<u8> {
    check_block_size(block_size);
    let pad_len = block_size - data.len() % block_size;
    let mut padded = Vec::with_capacity(data.len() + pad_len);
    padded.extend_from_slice(data);
    // check_block_size guarantees pad_len <= 255
    #[allow(clippy::cast_possible_truncation)]
    padded.resize(data.len() + pad_len, pad_len as u8);
    padded
}

/// Strips the padding added by [`pad`], validating every pad byte.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidPadding`] if the buffer is empty, is not a
/// multiple of `block_size`, or its trailing bytes are not a well-formed pad.
///
/// # Panics
///
/// Panics if `block_size` is 0 or larger than 255.
pub fn unpad(data: &[u8], block_size: usize) -> CryptoResult<&[u8]> {
    check_block_size(block_size);
    if data.is_empty() || data.len() % block_size != 0 {
        return Err(CryptoError::InvalidPadding);
    }

    let pad_byte = data[data.len() - 1];
    let pad_len = usize::from(pad_byte);
    if pad_len == 0 || pad_len > block_size || pad_len > data.len() {
        return Err(CryptoError::InvalidPadding);
    }

    let (body, tail) = data.split_at(data.len() - pad_len);
    // Fold over the whole tail instead of stopping at the first bad byte.
    let mismatch = tail.iter().fold(0u8, |acc, &b| acc | (b ^ pad_byte));
    if mismatch != 0 {
        return Err(CryptoError::InvalidPadding);
    }
    Ok(body)
}
