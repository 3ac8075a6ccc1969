//! `ChaCha20-Poly1305` AEAD session encryption.
//!
//! Provides authenticated encryption for session frames:
//! - 256-bit session keys (zeroized on drop)
//! - 96-bit nonces, generated fresh from the OS CSPRNG for every frame
//! - 128-bit authentication tags
//!
//! The framed form produced by [`SessionKey::seal`] is
//! `nonce(12) || ciphertext || tag(16)`; [`SessionKey::open`] splits and
//! verifies it. Nonce uniqueness per key holds for the lifetime of a
//! session because every nonce is drawn independently from the CSPRNG and
//! session keys are never reused across connections.

use crate::{AEAD_KEY_SIZE, AEAD_NONCE_SIZE, AEAD_TAG_SIZE, CryptoError, random};
use chacha20poly1305::{
    ChaCha20Poly1305,
    aead::{Aead, KeyInit},
};
use zeroize::ZeroizeOnDrop;

/// AEAD nonce (12 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Nonce([u8; AEAD_NONCE_SIZE]);

impl Nonce {
    /// Create a nonce from raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; AEAD_NONCE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create a nonce from a slice.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() != AEAD_NONCE_SIZE {
            return None;
        }
        let mut bytes = [0u8; AEAD_NONCE_SIZE];
        bytes.copy_from_slice(slice);
        Some(Self(bytes))
    }

    /// Generate a fresh random nonce from the OS CSPRNG.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::RandomFailed`] if the CSPRNG fails.
    pub fn generate() -> Result<Self, CryptoError> {
        Ok(Self(random::aead_nonce()?))
    }

    /// Get raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; AEAD_NONCE_SIZE] {
        &self.0
    }

    fn as_generic(&self) -> &chacha20poly1305::Nonce {
        chacha20poly1305::Nonce::from_slice(&self.0)
    }
}

/// Symmetric session key (32 bytes).
///
/// Derived once per connection by the handshake and owned exclusively by
/// that connection. Zeroized on drop.
#[derive(Clone, ZeroizeOnDrop)]
pub struct SessionKey([u8; AEAD_KEY_SIZE]);

impl SessionKey {
    /// Create a key from raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; AEAD_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from slice.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyLength`] if the slice is not 32 bytes.
    pub fn from_slice(slice: &[u8]) -> Result<Self, CryptoError> {
        if slice.len() != AEAD_KEY_SIZE {
            return Err(CryptoError::InvalidKeyLength {
                expected: AEAD_KEY_SIZE,
                actual: slice.len(),
            });
        }
        let mut bytes = [0u8; AEAD_KEY_SIZE];
        bytes.copy_from_slice(slice);
        Ok(Self(bytes))
    }

    /// Get raw key bytes.
    ///
    /// # Security
    ///
    /// Handle with extreme care - this exposes the raw key material.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; AEAD_KEY_SIZE] {
        &self.0
    }

    /// Encrypt plaintext with an explicit nonce.
    ///
    /// Returns ciphertext with appended authentication tag. Callers must
    /// guarantee nonce uniqueness per key; prefer [`SessionKey::seal`].
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::EncryptionFailed`] if AEAD encryption fails.
    pub fn encrypt(&self, nonce: &Nonce, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let cipher = ChaCha20Poly1305::new((&self.0).into());
        cipher
            .encrypt(nonce.as_generic(), plaintext)
            .map_err(|_| CryptoError::EncryptionFailed)
    }

    /// Decrypt ciphertext-with-tag under an explicit nonce.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::DecryptionFailed`] on authentication failure,
    /// truncation, or any tampering.
    pub fn decrypt(&self, nonce: &Nonce, ciphertext_and_tag: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if ciphertext_and_tag.len() < AEAD_TAG_SIZE {
            return Err(CryptoError::DecryptionFailed);
        }
        let cipher = ChaCha20Poly1305::new((&self.0).into());
        cipher
            .decrypt(nonce.as_generic(), ciphertext_and_tag)
            .map_err(|_| CryptoError::DecryptionFailed)
    }

    /// Encrypt a session frame: fresh random nonce, output
    /// `nonce || ciphertext || tag`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::RandomFailed`] if nonce generation fails, or
    /// [`CryptoError::EncryptionFailed`] if encryption fails.
    pub fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let nonce = Nonce::generate()?;
        let ciphertext = self.encrypt(&nonce, plaintext)?;

        let mut framed = Vec::with_capacity(AEAD_NONCE_SIZE + ciphertext.len());
        framed.extend_from_slice(nonce.as_bytes());
        framed.extend_from_slice(&ciphertext);
        Ok(framed)
    }

    /// Decrypt a session frame produced by [`SessionKey::seal`].
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::DecryptionFailed`] if the frame is too short
    /// to carry a nonce and tag, or if the tag does not verify.
    pub fn open(&self, framed: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if framed.len() < AEAD_NONCE_SIZE + AEAD_TAG_SIZE {
            return Err(CryptoError::DecryptionFailed);
        }
        let (nonce_bytes, ciphertext) = framed.split_at(AEAD_NONCE_SIZE);
        let nonce = Nonce::from_slice(nonce_bytes).ok_or(CryptoError::DecryptionFailed)?;
        self.decrypt(&nonce, ciphertext)
    }
}
