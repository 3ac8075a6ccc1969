//! # Quill Crypto
//!
//! Cryptographic primitives for the Quill protocol.
//!
//! This crate provides:
//! - X25519 ephemeral key agreement with low-order point rejection
//! - `ChaCha20-Poly1305` AEAD session framing (`nonce || ciphertext || tag`)
//! - HKDF-style key derivation over BLAKE3
//! - Multi-algorithm signatures (RSA-PKCS#1v1.5, ECDSA P-256, Ed25519)
//!   with tagged dispatch selected at key-load time
//! - Secure random number generation
//!
//! ## Cryptographic Suite
//!
//! | Function | Algorithm | Notes |
//! |----------|-----------|-------|
//! | Key Exchange | X25519 | ephemeral, one exchange per keypair |
//! | AEAD | ChaCha20-Poly1305 | 256-bit key, 96-bit nonce |
//! | Hash / KDF | BLAKE3 / HKDF-BLAKE3 | extract-then-expand |
//! | Signatures | RSA-2048, ECDSA P-256, Ed25519 | SHA-256 for RSA/ECDSA |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod aead;
pub mod error;
pub mod kdf;
pub mod kex;
pub mod random;
pub mod signatures;

pub use aead::SessionKey;
pub use error::CryptoError;
pub use kex::{EphemeralPrivateKey, PeerPublicKey, SharedSecret};
pub use signatures::{KeyAlgorithm, SigningKey, VerifyingKey};

/// X25519 public key size
pub const X25519_PUBLIC_KEY_SIZE: usize = 32;

/// ChaCha20-Poly1305 key size
pub const AEAD_KEY_SIZE: usize = 32;

/// ChaCha20-Poly1305 nonce size
pub const AEAD_NONCE_SIZE: usize = 12;

/// Poly1305 authentication tag size
pub const AEAD_TAG_SIZE: usize = 16;

/// Ed25519 signature size
pub const ED25519_SIGNATURE_SIZE: usize = 64;

/// Handshake nonce size
pub const HANDSHAKE_NONCE_SIZE: usize = 32;
