// File:    config.rs
// Author:  apezoo
// Date:    2026-10-16
//
// Description: Dispatcher settings, read from the environment with safe defaults.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use std::env;
use std::str::FromStr;

use log::warn;
use thiserror::Error;

use crate::oaep::DEFAULT_KEY_BITS;

/// Default ceiling on the decoded input size of any operation (16 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 16 * 1024 * 1024;
/// Smallest RSA modulus the configuration accepts.
pub const MIN_RSA_KEY_BITS: usize = 1024;

/// Environment variable overriding [`Config::rsa_key_bits`].
pub const RSA_BITS_VAR: &str = "CRYPTOOL_RSA_BITS";
/// Environment variable overriding [`Config::max_input_bytes`].
pub const MAX_INPUT_VAR: &str = "CRYPTOOL_MAX_INPUT_BYTES";

/// A setting that was readable but not acceptable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The RSA modulus is too small or not a whole number of bytes.
    #[error("RSA key size must be a multiple of 8 bits and at least {min}, got {bits}")]
    InvalidRsaKeyBits {
        /// The rejected size in bits.
        bits: usize,
        /// Smallest accepted size in bits.
        min: usize,
    },
}

/// Checks an RSA modulus size before any key of that size is generated.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidRsaKeyBits`] if `bits` is below
/// [`MIN_RSA_KEY_BITS`] or not a multiple of 8.
pub const fn validate_rsa_key_bits(bits: usize) -> Result<usize, ConfigError> {
    if bits < MIN_RSA_KEY_BITS || bits % 8 != 0 {
        return Err(ConfigError::InvalidRsaKeyBits {
            bits,
            min: MIN_RSA_KEY_BITS,
        });
    }
    Ok(bits)
}

/// Immutable settings shared by every dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Modulus size of the RSA keys generated per request.
    pub rsa_key_bits: usize,
    /// Largest decoded input any operation accepts.
    pub max_input_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rsa_key_bits: DEFAULT_KEY_BITS,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Unparsable or out-of-range values are logged and replaced by the
    /// default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let rsa_key_bits =
            match validate_rsa_key_bits(parse_or(&lookup, RSA_BITS_VAR, defaults.rsa_key_bits)) {
                Ok(bits) => bits,
                Err(e) => {
                    warn!("Ignoring {RSA_BITS_VAR}: {e}; using {}", defaults.rsa_key_bits);
                    defaults.rsa_key_bits
                }
            };

        let max_input_bytes = parse_or(&lookup, MAX_INPUT_VAR, defaults.max_input_bytes);

        Self {
            rsa_key_bits,
            max_input_bytes,
        }
    }
}

fn parse_or<T, F>(lookup: &F, name: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid value '{raw}' for {name}; using {default}");
            default
        }),
    }
}
