//! X25519 ephemeral Diffie-Hellman key exchange (RFC 7748).
//!
//! Every handshake attempt generates a fresh keypair; the private half is
//! consumed by [`EphemeralPrivateKey::exchange`], so the type system rules
//! out key reuse across handshakes (forward secrecy depends on it).
//!
//! Low-order and identity peer points are rejected explicitly: an exchange
//! whose shared secret is non-contributory fails with
//! [`CryptoError::InvalidPeerKey`].

use crate::{CryptoError, X25519_PUBLIC_KEY_SIZE};
use rand_core::OsRng;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Ephemeral X25519 private key.
///
/// Consumed by the exchange; cannot be serialized or reused.
pub struct EphemeralPrivateKey(x25519_dalek::EphemeralSecret);

/// X25519 public key in wire form (32 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeerPublicKey(x25519_dalek::PublicKey);

/// X25519 shared secret (32 bytes).
///
/// Zeroized on drop; only meaningful as KDF input.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; 32]);

impl EphemeralPrivateKey {
    /// Generate a fresh ephemeral keypair with RFC 7748 clamping.
    #[must_use]
    pub fn generate() -> Self {
        Self(x25519_dalek::EphemeralSecret::random_from_rng(OsRng))
    }

    /// Derive the public key for this private key.
    #[must_use]
    pub fn public_key(&self) -> PeerPublicKey {
        PeerPublicKey(x25519_dalek::PublicKey::from(&self.0))
    }

    /// Perform the Diffie-Hellman exchange, consuming the private key.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidPeerKey`] if the peer's public key is
    /// the identity or another low-order point.
    pub fn exchange(self, peer_public: &PeerPublicKey) -> Result<SharedSecret, CryptoError> {
        let shared = self.0.diffie_hellman(&peer_public.0);

        if !shared.was_contributory() || shared.as_bytes() == &[0u8; 32] {
            return Err(CryptoError::InvalidPeerKey);
        }

        Ok(SharedSecret(*shared.as_bytes()))
    }
}

impl PeerPublicKey {
    /// Import a public key from its 32-byte wire form.
    #[must_use]
    pub fn from_bytes(bytes: [u8; X25519_PUBLIC_KEY_SIZE]) -> Self {
        Self(x25519_dalek::PublicKey::from(bytes))
    }

    /// Export the 32-byte wire form.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; X25519_PUBLIC_KEY_SIZE] {
        *self.0.as_bytes()
    }

    /// Get bytes as a reference.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; X25519_PUBLIC_KEY_SIZE] {
        self.0.as_bytes()
    }
}

impl SharedSecret {
    /// Get the shared secret bytes.
    ///
    /// # Security
    ///
    /// Feed this through the KDF before using it as a key.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}
