// File:    input.rs
// Author:  apezoo
// Date:    2026-10-16
//
// Description: Request model and normalization of text or base64 file input into bytes.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

use crate::error::NormalizeError;

/// How the client delivered the payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputOrigin {
    /// A UTF-8 string typed by the user.
    #[default]
    Text,
    /// Binary file content, base64 encoded, optionally as a data URI.
    File,
}

/// A single client call, as received over the wire.
///
/// Every field defaults when absent so operations that ignore the payload can
/// be called with an empty body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRequest {
    /// Raw text, or base64 file content.
    #[serde(default)]
    pub data: String,
    /// Display name of the input, echoed back in the response.
    #[serde(default)]
    pub name: String,
    /// Client-reported size; informational only.
    #[serde(default)]
    pub size: u64,
    /// Whether `data` is text or file content.
    #[serde(rename = "type", default)]
    pub origin: InputOrigin,
}

impl OperationRequest {
    /// A text request named `name`.
    #[must_use]
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let data = text.into();
        Self {
            size: data.len() as u64,
            data,
            name: name.into(),
            origin: InputOrigin::Text,
        }
    }

    /// A file request carrying `bytes` base64 encoded, as a browser upload would.
    #[must_use]
    pub fn file(name: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            data: STANDARD.encode(bytes),
            name: name.into(),
            size: bytes.len() as u64,
            origin: InputOrigin::File,
        }
    }
}

/// Decoded request bytes plus what the client claimed about them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaintextBuffer {
    bytes: Vec<u8>,
    origin: InputOrigin,
    declared_size: u64,
}

impl PlaintextBuffer {
    /// Normalizes the payload of `request`.
    ///
    /// # Errors
    ///
    /// Returns a [`NormalizeError`] if the payload is empty text or bad base64.
    pub fn from_request(request: &OperationRequest) -> Result<Self, NormalizeError> {
        Ok(Self {
            bytes: normalize(request.origin, &request.data)?,
            origin: request.origin,
            declared_size: request.size,
        })
    }

    /// A buffer for operations that ignore the payload.
    #[must_use]
    pub const fn empty(origin: InputOrigin, declared_size: u64) -> Self {
        Self {
            bytes: Vec::new(),
            origin,
            declared_size,
        }
    }

    /// The decoded bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Actual decoded length; this, not the declared size, drives processing.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if no bytes were decoded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Where the bytes came from.
    #[must_use]
    pub const fn origin(&self) -> InputOrigin {
        self.origin
    }

    /// The size the client reported.
    #[must_use]
    pub const fn declared_size(&self) -> u64 {
        self.declared_size
    }
}

/// Converts client input into bytes.
///
/// Text is taken as UTF-8. File data may carry a data-URI header such as
/// `data:application/pdf;base64,`; everything up to the first comma is
/// dropped before decoding. Line breaks and other ASCII whitespace inside the
/// base64 body are ignored.
///
/// # Errors
///
/// Returns [`NormalizeError::EmptyText`] for blank text and
/// [`NormalizeError::MalformedBase64`] if file data does not decode.
pub fn normalize(origin: InputOrigin, raw: &str) -> Result<Vec<u8>, NormalizeError> {
    match origin {
        InputOrigin::Text => {
            if raw.trim().is_empty() {
                return Err(NormalizeError::EmptyText);
            }
            Ok(raw.as_bytes().to_vec())
        }
        InputOrigin::File => {
            let encoded = raw.split_once(',').map_or(raw, |(_, rest)| rest);
            let compact: String = encoded
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect();
            STANDARD
                .decode(compact)
                .map_err(|e| NormalizeError::MalformedBase64(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_utf8_bytes() {
        let bytes = normalize(InputOrigin::Text, "héllo").unwrap();
        assert_eq!(bytes, "héllo".as_bytes());
    }

    #[test]
    fn blank_text_is_rejected() {
        assert_eq!(normalize(InputOrigin::Text, ""), Err(NormalizeError::EmptyText));
        assert_eq!(normalize(InputOrigin::Text, " \n\t "), Err(NormalizeError::EmptyText));
    }

    #[test]
    fn text_keeps_surrounding_whitespace() {
        assert_eq!(normalize(InputOrigin::Text, " a ").unwrap(), b" a ");
    }

    #[test]
    fn data_uri_header_is_stripped() {
        let raw = "data:text/plain;base64,aGVsbG8=";
        assert_eq!(normalize(InputOrigin::File, raw).unwrap(), b"hello");
    }

    #[test]
    fn bare_base64_is_decoded() {
        assert_eq!(normalize(InputOrigin::File, "aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn only_first_comma_delimits_header() {
        // "a,b" is not base64, so the remainder after the first comma must fail
        let err = normalize(InputOrigin::File, "data:x;base64,a,b").unwrap_err();
        assert!(matches!(err, NormalizeError::MalformedBase64(_)));
    }

    #[test]
    fn wrapped_base64_is_decoded() {
        let raw = "data:text/plain;base64,aGVs\r\nbG8g\nd29y bGQ=\n";
        assert_eq!(normalize(InputOrigin::File, raw).unwrap(), b"hello world");
    }

    #[test]
    fn malformed_base64_is_rejected() {
        let err = normalize(InputOrigin::File, "not base64!").unwrap_err();
        assert!(matches!(err, NormalizeError::MalformedBase64(_)));
    }

    #[test]
    fn empty_file_is_accepted() {
        assert!(normalize(InputOrigin::File, "").unwrap().is_empty());
        assert!(normalize(InputOrigin::File, "data:application/octet-stream;base64,").unwrap().is_empty());
    }

    #[test]
    fn declared_size_is_not_trusted() {
        let request = OperationRequest {
            data: "abc".to_string(),
            name: "x.txt".to_string(),
            size: 1_000_000,
            origin: InputOrigin::Text,
        };
        let buffer = PlaintextBuffer::from_request(&request).unwrap();
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.declared_size(), 1_000_000);
        assert_eq!(buffer.origin(), InputOrigin::Text);
    }

    #[test]
    fn request_fields_default_when_missing() {
        let request: OperationRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, OperationRequest::default());
        let request: OperationRequest =
            serde_json::from_str(r#"{"data":"eA==","name":"f.bin","size":1,"type":"file"}"#).unwrap();
        assert_eq!(request.origin, InputOrigin::File);
    }
}
