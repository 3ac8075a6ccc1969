//! Cryptographic error types.
//!
//! Error messages never embed key material, signatures, or shared secrets.

use thiserror::Error;

/// Cryptographic errors
#[derive(Debug, Error)]
pub enum CryptoError {
    /// AEAD encryption failed
    #[error("encryption failed")]
    EncryptionFailed,

    /// AEAD decryption failed (authentication failure)
    #[error("decryption failed: authentication failure")]
    DecryptionFailed,

    /// Invalid key length
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// Peer's Diffie-Hellman public key is malformed or a low-order point
    #[error("invalid peer key: malformed or low-order point")]
    InvalidPeerKey,

    /// Invalid signature
    #[error("invalid signature")]
    InvalidSignature,

    /// Invalid public key
    #[error("invalid public key")]
    InvalidPublicKey,

    /// Key generation failed
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    /// Signing operation failed
    #[error("signing failed")]
    SigningFailed,

    /// Invalid key material (corrupted or wrong format)
    #[error("invalid key material")]
    InvalidKeyMaterial,

    /// Random number generation failed
    #[error("random number generation failed")]
    RandomFailed,
}
