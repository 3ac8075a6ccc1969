//! HKDF-style key derivation over BLAKE3.
//!
//! Extract-then-expand in the shape of RFC 5869, instantiated with BLAKE3:
//! extract is a keyed hash under the (hashed) salt, expand is the keyed
//! XOF over the info string. The derivation is deterministic, so both
//! handshake endpoints independently reach the same session key from the
//! same shared secret, salt, and info.

use crate::SessionKey;
use crate::kex::SharedSecret;

/// HKDF-Extract: extract a pseudorandom key from input key material.
#[must_use]
pub fn hkdf_extract(salt: &[u8], ikm: &[u8]) -> [u8; 32] {
    if salt.is_empty() {
        // No salt: just hash the IKM
        *blake3::hash(ikm).as_bytes()
    } else {
        let salt_hash = blake3::hash(salt);
        let mut hasher = blake3::Hasher::new_keyed(salt_hash.as_bytes());
        hasher.update(ikm);
        *hasher.finalize().as_bytes()
    }
}

/// HKDF-Expand: expand a pseudorandom key into arbitrary-length output.
pub fn hkdf_expand(prk: &[u8; 32], info: &[u8], output: &mut [u8]) {
    let mut hasher = blake3::Hasher::new_keyed(prk);
    hasher.update(info);

    let mut reader = hasher.finalize_xof();
    reader.fill(output);
}

/// HKDF: combined extract-then-expand.
pub fn hkdf(salt: &[u8], ikm: &[u8], info: &[u8], output: &mut [u8]) {
    let prk = hkdf_extract(salt, ikm);
    hkdf_expand(&prk, info, output);
}

/// Derive a symmetric session key from a Diffie-Hellman shared secret.
///
/// `salt` is the per-handshake nonce, `info` the protocol context string.
/// Deterministic: identical inputs always yield the identical key.
#[must_use]
pub fn derive_session_key(shared_secret: &SharedSecret, salt: &[u8], info: &[u8]) -> SessionKey {
    let mut key = [0u8; 32];
    hkdf(salt, shared_secret.as_bytes(), info, &mut key);
    SessionKey::from_bytes(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kex::EphemeralPrivateKey;

    #[test]
    fn test_extract_deterministic() {
        let prk1 = hkdf_extract(b"salt", b"input key material");
        let prk2 = hkdf_extract(b"salt", b"input key material");
        assert_eq!(prk1, prk2);
    }

    #[test]
    fn test_extract_salt_sensitivity() {
        let prk1 = hkdf_extract(b"salt-one", b"ikm");
        let prk2 = hkdf_extract(b"salt-two", b"ikm");
        assert_ne!(prk1, prk2);
    }

    #[test]
    fn test_expand_deterministic() {
        let prk = [0x42u8; 32];
        let mut out1 = [0u8; 64];
        let mut out2 = [0u8; 64];

        hkdf_expand(&prk, b"application info", &mut out1);
        hkdf_expand(&prk, b"application info", &mut out2);

        assert_eq!(out1, out2);
    }

    #[test]
    fn test_expand_info_sensitivity() {
        let prk = [0x42u8; 32];
        let mut out1 = [0u8; 32];
        let mut out2 = [0u8; 32];

        hkdf_expand(&prk, b"info-a", &mut out1);
        hkdf_expand(&prk, b"info-b", &mut out2);

        assert_ne!(out1, out2);
    }

    #[test]
    fn test_hkdf_no_salt() {
        let mut out = [0u8; 32];
        hkdf(b"", b"ikm", b"info", &mut out);
        assert_ne!(out, [0u8; 32]);
    }

    #[test]
    fn test_both_sides_derive_identical_session_key() {
        let alice = EphemeralPrivateKey::generate();
        let alice_public = alice.public_key();
        let bob = EphemeralPrivateKey::generate();
        let bob_public = bob.public_key();

        let alice_shared = alice.exchange(&bob_public).unwrap();
        let bob_shared = bob.exchange(&alice_public).unwrap();

        let salt = [7u8; 32];
        let key_a = derive_session_key(&alice_shared, &salt, b"quill test");
        let key_b = derive_session_key(&bob_shared, &salt, b"quill test");

        assert_eq!(key_a.as_bytes(), key_b.as_bytes());
    }

    #[test]
    fn test_session_key_salt_sensitivity() {
        let alice = EphemeralPrivateKey::generate();
        let bob_public = EphemeralPrivateKey::generate().public_key();
        let shared = alice.exchange(&bob_public).unwrap();

        let key_a = derive_session_key(&shared, b"salt-a", b"info");
        let key_b = derive_session_key(&shared, b"salt-b", b"info");

        assert_ne!(key_a.as_bytes(), key_b.as_bytes());
    }
}
