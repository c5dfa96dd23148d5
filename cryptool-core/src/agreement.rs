// File:    agreement.rs
// Author:  apezoo
// Date:    2026-10-16
//
// Description: Elliptic-curve Diffie-Hellman key agreement on P-256.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use p256::{PublicKey, ecdh::EphemeralSecret};
use rand_core::OsRng;

use crate::error::{CryptoError, CryptoResult};
use crate::primitive::{Auxiliary, Operation, Payload, Primitive, PrimitiveOutput};

/// Length of a P-256 shared secret (the x-coordinate) in bytes.
pub const SHARED_SECRET_LEN: usize = 32;

/// One side of a key agreement, holding an ephemeral key pair.
pub struct Party {
    secret: EphemeralSecret,
    public: PublicKey,
}

impl Party {
    /// Generates a fresh P-256 key pair.
    #[must_use]
    pub fn generate() -> Self {
        let secret = EphemeralSecret::random(&mut OsRng);
        let public = secret.public_key();
        Self { secret, public }
    }

    /// The public half, safe to hand to the peer.
    #[must_use]
    pub const fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Derives the shared secret with `peer`.
    #[must_use]
    pub fn shared_secret(&self, peer: &PublicKey) -> Vec<u8> {
        self.secret.diffie_hellman(peer).raw_secret_bytes().to_vec()
    }
}

/// Runs a full exchange between two fresh parties and returns the secret.
///
/// # Errors
///
/// Returns [`CryptoError::KeyAgreementMismatch`] if the two sides derive
/// different secrets, which can only mean a broken primitive.
pub fn exchange() -> CryptoResult<Vec<u8>> {
    let alice = Party::generate();
    let bob = Party::generate();

    let alice_secret = alice.shared_secret(bob.public_key());
    let bob_secret = bob.shared_secret(alice.public_key());
    if alice_secret != bob_secret {
        return Err(CryptoError::KeyAgreementMismatch);
    }
    Ok(alice_secret)
}

/// Key agreement between two ephemeral parties.
#[derive(Debug, Clone, Copy, Default)]
pub struct EcdhP256;

impl Primitive for EcdhP256 {
    fn operation(&self) -> Operation {
        Operation::KeyAgreement
    }

    fn label(&self) -> String {
        "ECDH P-256".to_string()
    }

    fn invoke(&self, _input: &[u8]) -> CryptoResult<PrimitiveOutput> {
        let shared = exchange()?;
        Ok(PrimitiveOutput {
            payload: Payload::SharedSecret(shared),
            auxiliary: Auxiliary {
                key_agreement: Some(true),
                ..Auxiliary::default()
            },
        })
    }
}
