//! Error types for the handshake and session layers.
//!
//! Handshake errors are fatal and non-retryable: the caller must close the
//! underlying connection. Messages never include signatures, keys, or other
//! cryptographic material.

use quill_crypto::CryptoError;
use quill_identity::IdentityError;
use quill_transport::TransportError;
use thiserror::Error;

/// Handshake failures
#[derive(Debug, Error)]
pub enum HandshakeError {
    /// Peer spoke a different protocol version
    #[error("protocol version mismatch: expected {expected}, got {got}")]
    VersionMismatch {
        /// Our protocol version
        expected: u8,
        /// Version byte the peer sent
        got: u8,
    },

    /// Frame payload did not decode as a handshake message
    #[error("malformed handshake message")]
    MalformedMessage,

    /// Decoded message was not the one the current state expects
    #[error("unexpected handshake message: expected {expected}")]
    UnexpectedMessage {
        /// Name of the expected message
        expected: &'static str,
    },

    /// Peer certificate failed validation against the trust anchors
    #[error("peer certificate chain invalid")]
    CertificateChainInvalid,

    /// Peer certificate carried an unusable public key
    #[error("peer certificate public key invalid")]
    InvalidPeerCertificateKey,

    /// Peer's transcript signature failed verification
    #[error("peer transcript signature invalid")]
    SignatureInvalid,

    /// Peer's ephemeral Diffie-Hellman key was rejected
    #[error("peer ephemeral key invalid")]
    InvalidPeerKey,

    /// Peer did not respond within the handshake timeout
    #[error("handshake timed out")]
    Timeout,

    /// Frame transport failure
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Local cryptographic failure (key generation, signing, randomness)
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Local identity or trust-store failure
    #[error("identity error: {0}")]
    Identity(#[from] IdentityError),
}

impl HandshakeError {
    /// Whether this failure means the peer's identity was rejected, as
    /// opposed to a transport-level or local failure.
    #[must_use]
    pub fn is_peer_rejection(&self) -> bool {
        matches!(
            self,
            Self::CertificateChainInvalid
                | Self::SignatureInvalid
                | Self::InvalidPeerKey
                | Self::InvalidPeerCertificateKey
        )
    }
}

/// Session-phase failures
#[derive(Debug, Error)]
pub enum SessionError {
    /// Frame transport failure
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// AEAD authentication failure: the frame was forged, corrupted, or
    /// encrypted under a different key. Fatal to the session.
    #[error("frame decryption failed: {0}")]
    Decrypt(#[from] CryptoError),

    /// Channel already terminated by an earlier fatal error
    #[error("session closed")]
    Closed,
}
