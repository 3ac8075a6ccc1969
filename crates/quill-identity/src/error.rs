//! Error types for identity loading and trust validation.

use thiserror::Error;

/// Identity and trust errors
#[derive(Debug, Error)]
pub enum IdentityError {
    /// File could not be read or written
    #[error("identity file I/O: {0}")]
    Io(#[from] std::io::Error),

    /// Armor block missing, mislabeled, or not valid base64
    #[error("bad armor: {0}")]
    Armor(String),

    /// Certificate or key payload failed to decode
    #[error("malformed {0}")]
    Malformed(&'static str),

    /// Certificate public key does not match the loaded private key
    #[error("certificate does not match private key")]
    KeyMismatch,

    /// Trust anchor is not self-consistent (self-signature check failed)
    #[error("trust anchor {0:?} failed self-signature check")]
    UntrustedAnchor(String),

    /// Underlying cryptographic failure
    #[error("crypto error: {0}")]
    Crypto(#[from] quill_crypto::CryptoError),
}
