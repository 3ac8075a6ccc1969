//! Handshake transcript construction.
//!
//! Both sides must assemble byte-identical transcripts or signature
//! verification deterministically fails, so the concatenation rule lives
//! here and nowhere else. Order is fixed: the shared nonce, then the
//! initiator's ephemeral public key (the first ephemeral key on the wire),
//! then the responder's.

use quill_crypto::{HANDSHAKE_NONCE_SIZE, X25519_PUBLIC_KEY_SIZE};

/// Transcript signed by the initiator: `nonce || initiator_ephemeral`.
#[must_use]
pub fn initiator(
    nonce: &[u8; HANDSHAKE_NONCE_SIZE],
    initiator_ephemeral: &[u8; X25519_PUBLIC_KEY_SIZE],
) -> Vec<u8> {
    let mut transcript = Vec::with_capacity(HANDSHAKE_NONCE_SIZE + X25519_PUBLIC_KEY_SIZE);
    transcript.extend_from_slice(nonce);
    transcript.extend_from_slice(initiator_ephemeral);
    transcript
}

/// Transcript signed by the responder:
/// `nonce || initiator_ephemeral || responder_ephemeral`.
#[must_use]
pub fn responder(
    nonce: &[u8; HANDSHAKE_NONCE_SIZE],
    initiator_ephemeral: &[u8; X25519_PUBLIC_KEY_SIZE],
    responder_ephemeral: &[u8; X25519_PUBLIC_KEY_SIZE],
) -> Vec<u8> {
    let mut transcript =
        Vec::with_capacity(HANDSHAKE_NONCE_SIZE + 2 * X25519_PUBLIC_KEY_SIZE);
    transcript.extend_from_slice(nonce);
    transcript.extend_from_slice(initiator_ephemeral);
    transcript.extend_from_slice(responder_ephemeral);
    transcript
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initiator_layout() {
        let nonce = [1u8; 32];
        let eph = [2u8; 32];

        let transcript = initiator(&nonce, &eph);
        assert_eq!(transcript.len(), 64);
        assert_eq!(&transcript[..32], &nonce);
        assert_eq!(&transcript[32..], &eph);
    }

    #[test]
    fn test_responder_layout() {
        let nonce = [1u8; 32];
        let eph_i = [2u8; 32];
        let eph_r = [3u8; 32];

        let transcript = responder(&nonce, &eph_i, &eph_r);
        assert_eq!(transcript.len(), 96);
        assert_eq!(&transcript[..32], &nonce);
        assert_eq!(&transcript[32..64], &eph_i);
        assert_eq!(&transcript[64..], &eph_r);
    }

    #[test]
    fn test_responder_extends_initiator() {
        let nonce = [7u8; 32];
        let eph_i = [8u8; 32];
        let eph_r = [9u8; 32];

        let first = initiator(&nonce, &eph_i);
        let full = responder(&nonce, &eph_i, &eph_r);
        assert_eq!(&full[..first.len()], &first[..]);
    }

    #[test]
    fn test_key_order_matters() {
        let nonce = [0u8; 32];
        let a = [1u8; 32];
        let b = [2u8; 32];

        assert_ne!(responder(&nonce, &a, &b), responder(&nonce, &b, &a));
    }
}
