//! Handshake wire messages.
//!
//! Every handshake frame payload starts with a single protocol-version
//! byte, followed by the binary (bincode) encoding of a
//! [`HandshakeMessage`]. The version byte lets either side fail fast on an
//! incompatible peer instead of misparsing its messages.

use crate::HandshakeError;
use quill_crypto::{HANDSHAKE_NONCE_SIZE, X25519_PUBLIC_KEY_SIZE};
use quill_identity::Certificate;
use serde::{Deserialize, Serialize};

/// Current handshake protocol version.
pub const PROTOCOL_VERSION: u8 = 1;

/// A message exchanged during the handshake phase.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum HandshakeMessage {
    /// Responder's opening challenge: a fresh random nonce that salts the
    /// session-key derivation and binds both transcript signatures to this
    /// handshake.
    Nonce {
        /// Per-handshake random nonce
        nonce: [u8; HANDSHAKE_NONCE_SIZE],
    },
    /// Either side's credentials: certificate, ephemeral public key, and a
    /// signature over the role-appropriate transcript.
    Credential {
        /// Sender's certificate
        certificate: Certificate,
        /// Sender's ephemeral X25519 public key
        ephemeral_public: [u8; X25519_PUBLIC_KEY_SIZE],
        /// Signature by the sender's identity key over the transcript
        signature: Vec<u8>,
    },
}

impl HandshakeMessage {
    /// Encode as a frame payload: version byte plus binary body.
    ///
    /// # Errors
    ///
    /// Returns [`HandshakeError::MalformedMessage`] if encoding fails.
    pub fn encode(&self) -> Result<Vec<u8>, HandshakeError> {
        let body = bincode::serialize(self).map_err(|_| HandshakeError::MalformedMessage)?;
        let mut payload = Vec::with_capacity(1 + body.len());
        payload.push(PROTOCOL_VERSION);
        payload.extend_from_slice(&body);
        Ok(payload)
    }

    /// Decode a frame payload.
    ///
    /// # Errors
    ///
    /// Returns [`HandshakeError::VersionMismatch`] on a foreign version
    /// byte, or [`HandshakeError::MalformedMessage`] if the body does not
    /// decode.
    pub fn decode(payload: &[u8]) -> Result<Self, HandshakeError> {
        let (&version, body) = payload
            .split_first()
            .ok_or(HandshakeError::MalformedMessage)?;
        if version != PROTOCOL_VERSION {
            return Err(HandshakeError::VersionMismatch {
                expected: PROTOCOL_VERSION,
                got: version,
            });
        }
        bincode::deserialize(body).map_err(|_| HandshakeError::MalformedMessage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_crypto::{KeyAlgorithm, SigningKey};
    use quill_identity::Certificate;

    fn sample_certificate() -> Certificate {
        let key = SigningKey::generate(KeyAlgorithm::Ed25519).unwrap();
        Certificate::self_signed("msg-test", &key).unwrap()
    }

    #[test]
    fn test_nonce_roundtrip() {
        let message = HandshakeMessage::Nonce { nonce: [9u8; 32] };
        let payload = message.encode().unwrap();

        assert_eq!(payload[0], PROTOCOL_VERSION);
        match HandshakeMessage::decode(&payload).unwrap() {
            HandshakeMessage::Nonce { nonce } => assert_eq!(nonce, [9u8; 32]),
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_credential_roundtrip() {
        let message = HandshakeMessage::Credential {
            certificate: sample_certificate(),
            ephemeral_public: [3u8; 32],
            signature: vec![1, 2, 3, 4],
        };
        let payload = message.encode().unwrap();

        match HandshakeMessage::decode(&payload).unwrap() {
            HandshakeMessage::Credential {
                certificate,
                ephemeral_public,
                signature,
            } => {
                assert_eq!(certificate.subject(), "msg-test");
                assert_eq!(ephemeral_public, [3u8; 32]);
                assert_eq!(signature, vec![1, 2, 3, 4]);
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_foreign_version_rejected() {
        let mut payload = HandshakeMessage::Nonce { nonce: [0u8; 32] }.encode().unwrap();
        payload[0] = PROTOCOL_VERSION + 1;

        assert!(matches!(
            HandshakeMessage::decode(&payload),
            Err(HandshakeError::VersionMismatch { expected, got })
                if expected == PROTOCOL_VERSION && got == PROTOCOL_VERSION + 1
        ));
    }

    #[test]
    fn test_empty_payload_rejected() {
        assert!(matches!(
            HandshakeMessage::decode(&[]),
            Err(HandshakeError::MalformedMessage)
        ));
    }

    #[test]
    fn test_garbage_body_rejected() {
        let payload = [PROTOCOL_VERSION, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
        assert!(matches!(
            HandshakeMessage::decode(&payload),
            Err(HandshakeError::MalformedMessage)
        ));
    }
}
