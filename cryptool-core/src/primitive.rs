// File:    primitive.rs
// Author:  apezoo
// Date:    2026-10-16
//
// Description: The uniform contract every cryptographic operation is invoked through.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! The primitive adapter contract.
//!
//! The transforms themselves come from audited RustCrypto crates. This module
//! only fixes the shape of a call: bytes in, a payload plus auxiliary data
//! out, or a [`CryptoError`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::aead::AesGcm;
use crate::agreement::EcdhP256;
use crate::chaining::AesCbc;
use crate::config::Config;
use crate::error::CryptoResult;
use crate::hashing::Sha256Hash;
use crate::oaep::RsaOaep;

/// The fixed set of operations the dispatcher can route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    /// AES-256 in CBC mode with trailing-count padding.
    BlockCipherCbc,
    /// AES-256-GCM authenticated encryption.
    AeadGcm,
    /// RSA-OAEP with SHA-256 under a freshly generated key pair.
    AsymmetricOaep,
    /// ECDH on P-256 between two freshly generated parties.
    KeyAgreement,
    /// SHA-256 digest.
    Hash,
}

impl Operation {
    /// Every operation, in the order they are advertised to clients.
    pub const ALL: [Self; 5] = [
        Self::AeadGcm,
        Self::AsymmetricOaep,
        Self::KeyAgreement,
        Self::Hash,
        Self::BlockCipherCbc,
    ];

    /// Short selector used for routes and CLI subcommands.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::BlockCipherCbc => "cbc",
            Self::AeadGcm => "aes",
            Self::AsymmetricOaep => "rsa",
            Self::KeyAgreement => "ecdh",
            Self::Hash => "hash",
        }
    }

    /// Tag used as a prefix in log lines.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::BlockCipherCbc => "CBC",
            Self::AeadGcm => "AES",
            Self::AsymmetricOaep => "RSA",
            Self::KeyAgreement => "ECDH",
            Self::Hash => "HASH",
        }
    }

    /// Whether the operation reads the client payload at all.
    #[must_use]
    pub const fn consumes_input(self) -> bool {
        !matches!(self, Self::KeyAgreement)
    }

    /// Builds the primitive that implements this operation.
    #[must_use]
    pub fn primitive(self, config: &Config) -> Box<dyn Primitive> {
        match self {
            Self::BlockCipherCbc => Box::new(AesCbc),
            Self::AeadGcm => Box::new(AesGcm),
            Self::AsymmetricOaep => Box::new(RsaOaep::new(config.rsa_key_bits)),
            Self::KeyAgreement => Box::new(EcdhP256),
            Self::Hash => Box::new(Sha256Hash),
        }
    }
}

/// The main result of a primitive call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Encrypted bytes; for AEAD the tag is appended.
    Ciphertext(Vec<u8>),
    /// A message digest.
    Digest(Vec<u8>),
    /// The secret both parties of a key agreement derived.
    SharedSecret(Vec<u8>),
}

impl Payload {
    /// The raw bytes regardless of variant.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Ciphertext(b) | Self::Digest(b) | Self::SharedSecret(b) => b,
        }
    }

    /// Length of the payload in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// True when the payload holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

/// Side information a primitive reports next to its payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Auxiliary {
    /// The public IV or nonce that was used.
    pub iv: Option<Vec<u8>>,
    /// Time spent generating an asymmetric key pair.
    pub keygen_time: Option<Duration>,
    /// Whether both sides of a key agreement derived the same secret.
    pub key_agreement: Option<bool>,
}

/// What a successful [`Primitive::invoke`] returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimitiveOutput {
    /// The ciphertext, digest or shared secret.
    pub payload: Payload,
    /// Auxiliary fields for the response envelope.
    pub auxiliary: Auxiliary,
}

impl PrimitiveOutput {
    /// An output with no auxiliary data.
    #[must_use]
    pub fn new(payload: Payload) -> Self {
        Self {
            payload,
            auxiliary: Auxiliary::default(),
        }
    }
}

/// A single cryptographic operation behind the uniform call shape.
///
/// Implementations generate whatever key material they need inside
/// [`invoke`](Primitive::invoke); nothing survives the call.
pub trait Primitive: Send + Sync {
    /// The operation this primitive implements.
    fn operation(&self) -> Operation;

    /// Algorithm label used in messages, e.g. `RSA-2048`.
    fn label(&self) -> String;

    /// Largest input the algorithm accepts, if it has a limit.
    fn max_input_len(&self) -> Option<usize> {
        None
    }

    /// Runs the transform over `input`.
    ///
    /// # Errors
    ///
    /// Returns the [`CryptoError`](crate::error::CryptoError) kind listed for
    /// the operation when the transform cannot complete.
    fn invoke(&self, input: &[u8]) -> CryptoResult<PrimitiveOutput>;
}
