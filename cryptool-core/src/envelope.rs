// File:    envelope.rs
// Author:  apezoo
// Date:    2026-10-16
//
// Description: Per-request operation results and the JSON envelope they are sent as.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Operation results and their wire representation.
//!
//! An [`OperationResult`] is built once per request and converted into an
//! [`Envelope`] for the transport. Failure envelopes only ever carry the
//! error message.

use std::fmt::Write as _;
use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

use crate::error::{CryptoError, ErrorKind};
use crate::primitive::{Auxiliary, Payload};

/// Measurements and echoed request fields of a successful operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metrics {
    /// Name the client gave its input.
    pub original_name: String,
    /// Size the client reported for its input.
    pub original_size: u64,
    /// Wall-clock time of the primitive call.
    pub elapsed: Duration,
    /// Auxiliary fields reported by the primitive.
    pub auxiliary: Auxiliary,
}

/// Outcome of one dispatched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    /// The primitive completed.
    Success {
        /// Measurements and echoed request fields.
        metrics: Metrics,
        /// The primitive's output.
        payload: Payload,
    },
    /// The request failed at some stage.
    Failure {
        /// Which kind of failure.
        kind: ErrorKind,
        /// Human readable description.
        message: String,
    },
}

impl OperationResult {
    /// A failure result describing `error`.
    #[must_use]
    pub fn failure(error: &CryptoError) -> Self {
        Self::Failure {
            kind: error.kind(),
            message: error.to_string(),
        }
    }

    /// True for [`OperationResult::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The failure kind, if this is a failure.
    #[must_use]
    pub const fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }

    /// Converts the result into its wire form.
    #[must_use]
    pub fn to_envelope(&self) -> Envelope {
        match self {
            Self::Failure { message, .. } => Envelope {
                success: false,
                error: Some(message.clone()),
                ..Envelope::default()
            },
            Self::Success { metrics, payload } => {
                let aux = &metrics.auxiliary;
                let mut envelope = Envelope {
                    success: true,
                    original_name: Some(metrics.original_name.clone()),
                    original_size: Some(metrics.original_size),
                    iv: aux.iv.as_deref().map(to_hex),
                    keygen_time: aux.keygen_time.map(|d| format!("{:.0}", millis(d))),
                    ..Envelope::default()
                };
                match payload {
                    Payload::Ciphertext(ciphertext) => {
                        envelope.encrypted_size = Some(ciphertext.len());
                        envelope.encrypt_time = Some(format!("{:.2}", millis(metrics.elapsed)));
                        envelope.encrypted = Some(STANDARD.encode(ciphertext));
                    }
                    Payload::Digest(digest) => {
                        envelope.hash = Some(to_hex(digest));
                        envelope.hash_time = Some(format!("{:.2}", millis(metrics.elapsed)));
                    }
                    Payload::SharedSecret(secret) => {
                        envelope.key_agreement = aux.key_agreement;
                        envelope.shared_key_length = Some(secret.len());
                        envelope.shared_key = Some(to_hex(secret));
                    }
                }
                envelope
            }
        }
    }
}

impl From<OperationResult> for Envelope {
    fn from(result: OperationResult) -> Self {
        result.to_envelope()
    }
}

/// The JSON object returned to clients.
///
/// Absent fields are omitted from the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Echo of the request name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    /// Echo of the declared request size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_size: Option<u64>,
    /// Ciphertext length in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypted_size: Option<usize>,
    /// IV or nonce, hex encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iv: Option<String>,
    /// Encryption time in milliseconds, two decimals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypt_time: Option<String>,
    /// Key generation time in whole milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keygen_time: Option<String>,
    /// Digest, hex encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// Hashing time in milliseconds, two decimals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash_time: Option<String>,
    /// Ciphertext, base64 encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypted: Option<String>,
    /// Whether both parties derived the same secret.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_agreement: Option<bool>,
    /// Shared secret length in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_key_length: Option<usize>,
    /// Shared secret, hex encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_key: Option<String>,
    /// Failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    /// A failure envelope with `message`, for errors raised outside the
    /// dispatcher (for example an unreadable request body).
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Lowercase hex encoding of `bytes`.
#[must_use]
pub fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
            let _ = write!(out, "{b:02x}");
            out
        })
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}
