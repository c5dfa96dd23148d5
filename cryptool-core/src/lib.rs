// File:    lib.rs
// Author:  apezoo
// Date:    2026-10-16
//
// Description: The main library crate for cryptool-core, tying padding, key material, primitives and dispatch together.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! # Cryptool Core Library
//!
//! Runs a fixed set of cryptographic operations (AES-CBC, AES-GCM, RSA-OAEP,
//! ECDH and SHA-256) behind one request/response contract. The transforms
//! come from the RustCrypto crates; this library owns block padding, key
//! material generation, input normalization and the dispatcher that wraps
//! every outcome in a uniform envelope.

/// AES-256-GCM authenticated encryption.
pub mod aead;
/// ECDH key agreement on P-256.
pub mod agreement;
/// AES-256-CBC with the crate's padding codec.
pub mod chaining;
/// Dispatcher settings.
pub mod config;
/// The request dispatcher.
pub mod dispatcher;
/// Operation results and the wire envelope.
pub mod envelope;
/// The error taxonomy.
pub mod error;
/// SHA-256 hashing.
pub mod hashing;
/// Request model and input normalization.
pub mod input;
/// Fresh random keys and IVs.
pub mod key_material;
/// RSA-OAEP encryption.
pub mod oaep;
/// Block padding codec.
pub mod padding;
/// The uniform primitive contract.
pub mod primitive;

pub use config::Config;
pub use dispatcher::Dispatcher;
pub use envelope::{Envelope, OperationResult};
pub use error::{CryptoError, CryptoResult, ErrorKind};
pub use input::{InputOrigin, OperationRequest};
pub use primitive::Operation;
