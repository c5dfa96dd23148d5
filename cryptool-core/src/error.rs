// File:    error.rs
// Author:  apezoo
// Date:    2026-10-16
//
// Description: Error taxonomy shared by the primitives, the input normalizer and the dispatcher.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Errors raised by cryptographic operations.
//!
//! Messages are shown to end users inside failure envelopes, so no variant
//! ever carries key, IV or plaintext bytes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Reasons a client payload could not be turned into bytes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// Text input was empty once surrounding whitespace was removed.
    #[error("input text is empty")]
    EmptyText,

    /// File data was not valid base64.
    #[error("file data is not valid base64: {0}")]
    MalformedBase64(String),
}

/// Every way an operation can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The client input could not be normalized.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] NormalizeError),

    /// The payload exceeds what the algorithm can process.
    #[error("{algorithm} can only process up to {limit} bytes. Your input is {actual} bytes.")]
    PreconditionViolated {
        /// Human readable algorithm label, e.g. `RSA-2048`.
        algorithm: String,
        /// Largest accepted input in bytes.
        limit: usize,
        /// Size of the rejected input in bytes.
        actual: usize,
    },

    /// A key or IV did not have the length the cipher requires.
    #[error("invalid {what} length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Which parameter was wrong: `key`, `iv` or `nonce`.
        what: &'static str,
        /// Required length in bytes.
        expected: usize,
        /// Supplied length in bytes.
        actual: usize,
    },

    /// A padded buffer was malformed or tampered with.
    #[error("invalid padding")]
    InvalidPadding,

    /// AEAD tag verification failed.
    #[error("authentication failed: ciphertext or tag was modified")]
    AuthenticationFailed,

    /// Key or randomness generation failed.
    #[error("key generation failed: {0}")]
    KeyGenerationFailed(String),

    /// Both sides of a key agreement derived different secrets.
    #[error("key agreement mismatch: the two derived shared secrets differ")]
    KeyAgreementMismatch,

    /// The underlying primitive library reported an unexpected fault.
    #[error("primitive failure: {0}")]
    PrimitiveFailure(String),
}

/// Serializable discriminant of [`CryptoError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// See [`CryptoError::InvalidInput`].
    InvalidInput,
    /// See [`CryptoError::PreconditionViolated`].
    PreconditionViolated,
    /// See [`CryptoError::InvalidKeyLength`].
    InvalidKeyLength,
    /// See [`CryptoError::InvalidPadding`].
    InvalidPadding,
    /// See [`CryptoError::AuthenticationFailed`].
    AuthenticationFailed,
    /// See [`CryptoError::KeyGenerationFailed`].
    KeyGenerationFailed,
    /// See [`CryptoError::KeyAgreementMismatch`].
    KeyAgreementMismatch,
    /// See [`CryptoError::PrimitiveFailure`].
    PrimitiveFailure,
}

impl CryptoError {
    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::PreconditionViolated { .. } => ErrorKind::PreconditionViolated,
            Self::InvalidKeyLength { .. } => ErrorKind::InvalidKeyLength,
            Self::InvalidPadding => ErrorKind::InvalidPadding,
            Self::AuthenticationFailed => ErrorKind::AuthenticationFailed,
            Self::KeyGenerationFailed(_) => ErrorKind::KeyGenerationFailed,
            Self::KeyAgreementMismatch => ErrorKind::KeyAgreementMismatch,
            Self::PrimitiveFailure(_) => ErrorKind::PrimitiveFailure,
        }
    }
}
