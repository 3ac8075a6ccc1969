//! Multi-algorithm digital signatures for identity authentication.
//!
//! Three signature families are supported, one per certificate key type:
//! - RSA-2048 with PKCS#1 v1.5 padding and SHA-256
//! - ECDSA over P-256 with SHA-256 (64-byte fixed signatures)
//! - Ed25519 (64-byte signatures, deterministic)
//!
//! The algorithm is a tagged property of the key, decided once when the key
//! is generated or loaded. Sign and verify dispatch on that tag directly;
//! there is no trial-and-error probing across families, so a real
//! cryptographic failure is never mistaken for "wrong algorithm, try the
//! next one".
//!
//! ## Wire encodings
//!
//! | Algorithm | Public key | Private key | Signature |
//! |-----------|------------|-------------|-----------|
//! | RSA | PKCS#1 DER | PKCS#1 DER | PKCS#1 v1.5, modulus-sized |
//! | ECDSA P-256 | SEC1 uncompressed (65 B) | scalar (32 B) | fixed (64 B) |
//! | Ed25519 | raw (32 B) | seed (32 B) | raw (64 B) |

use crate::{CryptoError, ED25519_SIGNATURE_SIZE};
use ed25519_dalek::{Signer as _, Verifier as _};
use p256::ecdsa::signature::{Signer as _, Verifier as _};
use rand_core::OsRng;
use rsa::sha2::Sha256;
use rsa::signature::{SignatureEncoding as _, Signer as _, Verifier as _};
use serde::{Deserialize, Serialize};

/// RSA modulus size used for generated identity keys.
const RSA_KEY_BITS: usize = 2048;

/// Signature key algorithm, fixed at key creation or load time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyAlgorithm {
    /// RSA-2048, PKCS#1 v1.5 padding, SHA-256 digest
    Rsa,
    /// ECDSA over P-256, SHA-256 digest
    EcdsaP256,
    /// Ed25519
    Ed25519,
}

impl std::fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Rsa => "rsa-pkcs1-sha256",
            Self::EcdsaP256 => "ecdsa-p256-sha256",
            Self::Ed25519 => "ed25519",
        };
        f.write_str(name)
    }
}

/// Identity signing key (private key) over the supported families.
#[derive(Clone)]
pub enum SigningKey {
    /// RSA-2048 private key
    Rsa(rsa::RsaPrivateKey),
    /// ECDSA P-256 private key
    EcdsaP256(p256::ecdsa::SigningKey),
    /// Ed25519 private key
    Ed25519(ed25519_dalek::SigningKey),
}

impl SigningKey {
    /// Generate a fresh signing key for the given algorithm.
    ///
    /// RSA generation is orders of magnitude slower than the elliptic-curve
    /// families; callers generating identities interactively should prefer
    /// Ed25519 or ECDSA.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::KeyGeneration`] if key generation fails.
    pub fn generate(algorithm: KeyAlgorithm) -> Result<Self, CryptoError> {
        match algorithm {
            KeyAlgorithm::Rsa => {
                let key = rsa::RsaPrivateKey::new(&mut OsRng, RSA_KEY_BITS)
                    .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
                Ok(Self::Rsa(key))
            }
            KeyAlgorithm::EcdsaP256 => {
                Ok(Self::EcdsaP256(p256::ecdsa::SigningKey::random(&mut OsRng)))
            }
            KeyAlgorithm::Ed25519 => {
                Ok(Self::Ed25519(ed25519_dalek::SigningKey::generate(&mut OsRng)))
            }
        }
    }

    /// The algorithm this key was created for.
    #[must_use]
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            Self::Rsa(_) => KeyAlgorithm::Rsa,
            Self::EcdsaP256(_) => KeyAlgorithm::EcdsaP256,
            Self::Ed25519(_) => KeyAlgorithm::Ed25519,
        }
    }

    /// Sign a message, dispatching on the key's algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::SigningFailed`] if the underlying signature
    /// operation fails.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        match self {
            Self::Rsa(key) => {
                let signer = rsa::pkcs1v15::SigningKey::<Sha256>::new(key.clone());
                let signature: rsa::pkcs1v15::Signature = signer
                    .try_sign(message)
                    .map_err(|_| CryptoError::SigningFailed)?;
                Ok(signature.to_vec())
            }
            Self::EcdsaP256(key) => {
                let signature: p256::ecdsa::Signature =
                    key.try_sign(message).map_err(|_| CryptoError::SigningFailed)?;
                Ok(signature.to_bytes().to_vec())
            }
            Self::Ed25519(key) => Ok(key.sign(message).to_bytes().to_vec()),
        }
    }

    /// Derive the corresponding verifying key.
    #[must_use]
    pub fn verifying_key(&self) -> VerifyingKey {
        match self {
            Self::Rsa(key) => VerifyingKey::Rsa(key.to_public_key()),
            Self::EcdsaP256(key) => VerifyingKey::EcdsaP256(p256::ecdsa::VerifyingKey::from(key)),
            Self::Ed25519(key) => VerifyingKey::Ed25519(key.verifying_key()),
        }
    }

    /// Export the private key in its per-algorithm wire encoding.
    ///
    /// # Security
    ///
    /// This exposes raw secret key material. Handle with care.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyMaterial`] if encoding fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CryptoError> {
        match self {
            Self::Rsa(key) => {
                use rsa::pkcs1::EncodeRsaPrivateKey;
                let der = key
                    .to_pkcs1_der()
                    .map_err(|_| CryptoError::InvalidKeyMaterial)?;
                Ok(der.as_bytes().to_vec())
            }
            Self::EcdsaP256(key) => Ok(key.to_bytes().to_vec()),
            Self::Ed25519(key) => Ok(key.to_bytes().to_vec()),
        }
    }

    /// Import a private key from its per-algorithm wire encoding.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyMaterial`] if the bytes do not
    /// decode as a key of the given algorithm.
    pub fn from_bytes(algorithm: KeyAlgorithm, bytes: &[u8]) -> Result<Self, CryptoError> {
        match algorithm {
            KeyAlgorithm::Rsa => {
                use rsa::pkcs1::DecodeRsaPrivateKey;
                let key = rsa::RsaPrivateKey::from_pkcs1_der(bytes)
                    .map_err(|_| CryptoError::InvalidKeyMaterial)?;
                Ok(Self::Rsa(key))
            }
            KeyAlgorithm::EcdsaP256 => {
                let key = p256::ecdsa::SigningKey::from_slice(bytes)
                    .map_err(|_| CryptoError::InvalidKeyMaterial)?;
                Ok(Self::EcdsaP256(key))
            }
            KeyAlgorithm::Ed25519 => {
                let seed: [u8; 32] = bytes
                    .try_into()
                    .map_err(|_| CryptoError::InvalidKeyMaterial)?;
                Ok(Self::Ed25519(ed25519_dalek::SigningKey::from_bytes(&seed)))
            }
        }
    }
}

/// Identity verifying key (public key) over the supported families.
#[derive(Clone, Debug)]
pub enum VerifyingKey {
    /// RSA-2048 public key
    Rsa(rsa::RsaPublicKey),
    /// ECDSA P-256 public key
    EcdsaP256(p256::ecdsa::VerifyingKey),
    /// Ed25519 public key
    Ed25519(ed25519_dalek::VerifyingKey),
}

impl VerifyingKey {
    /// The algorithm this key belongs to.
    #[must_use]
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            Self::Rsa(_) => KeyAlgorithm::Rsa,
            Self::EcdsaP256(_) => KeyAlgorithm::EcdsaP256,
            Self::Ed25519(_) => KeyAlgorithm::Ed25519,
        }
    }

    /// Verify a signature over a message.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidSignature`] if the signature is
    /// malformed or does not authenticate the message under this key.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), CryptoError> {
        match self {
            Self::Rsa(key) => {
                let signature = rsa::pkcs1v15::Signature::try_from(signature)
                    .map_err(|_| CryptoError::InvalidSignature)?;
                let verifier = rsa::pkcs1v15::VerifyingKey::<Sha256>::new(key.clone());
                verifier
                    .verify(message, &signature)
                    .map_err(|_| CryptoError::InvalidSignature)
            }
            Self::EcdsaP256(key) => {
                let signature = p256::ecdsa::Signature::from_slice(signature)
                    .map_err(|_| CryptoError::InvalidSignature)?;
                key.verify(message, &signature)
                    .map_err(|_| CryptoError::InvalidSignature)
            }
            Self::Ed25519(key) => {
                let bytes: [u8; ED25519_SIGNATURE_SIZE] = signature
                    .try_into()
                    .map_err(|_| CryptoError::InvalidSignature)?;
                let signature = ed25519_dalek::Signature::from_bytes(&bytes);
                key.verify(message, &signature)
                    .map_err(|_| CryptoError::InvalidSignature)
            }
        }
    }

    /// Export the public key in its per-algorithm wire encoding.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyMaterial`] if encoding fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CryptoError> {
        match self {
            Self::Rsa(key) => {
                use rsa::pkcs1::EncodeRsaPublicKey;
                let der = key
                    .to_pkcs1_der()
                    .map_err(|_| CryptoError::InvalidKeyMaterial)?;
                Ok(der.as_bytes().to_vec())
            }
            Self::EcdsaP256(key) => Ok(key.to_encoded_point(false).as_bytes().to_vec()),
            Self::Ed25519(key) => Ok(key.to_bytes().to_vec()),
        }
    }

    /// Import a public key from its per-algorithm wire encoding.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidPublicKey`] if the bytes do not decode
    /// as a public key of the given algorithm.
    pub fn from_bytes(algorithm: KeyAlgorithm, bytes: &[u8]) -> Result<Self, CryptoError> {
        match algorithm {
            KeyAlgorithm::Rsa => {
                use rsa::pkcs1::DecodeRsaPublicKey;
                let key = rsa::RsaPublicKey::from_pkcs1_der(bytes)
                    .map_err(|_| CryptoError::InvalidPublicKey)?;
                Ok(Self::Rsa(key))
            }
            KeyAlgorithm::EcdsaP256 => {
                let key = p256::ecdsa::VerifyingKey::from_sec1_bytes(bytes)
                    .map_err(|_| CryptoError::InvalidPublicKey)?;
                Ok(Self::EcdsaP256(key))
            }
            KeyAlgorithm::Ed25519 => {
                let raw: [u8; 32] = bytes
                    .try_into()
                    .map_err(|_| CryptoError::InvalidPublicKey)?;
                let key = ed25519_dalek::VerifyingKey::from_bytes(&raw)
                    .map_err(|_| CryptoError::InvalidPublicKey)?;
                Ok(Self::Ed25519(key))
            }
        }
    }
}
