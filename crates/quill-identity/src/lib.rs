//! # Quill Identity
//!
//! Identity and trust provider for the Quill protocol.
//!
//! This crate provides:
//! - A compact certificate format binding a subject name to a public key,
//!   signed by an issuing anchor
//! - PEM-style armored files for certificates and private keys
//! - Local identity loading (certificate + matching private key)
//! - Trust-anchor sets and peer-certificate validation
//!
//! The format is bespoke: Quill does not interoperate with X.509 chains or
//! TLS trust stores. A trust anchor is a self-signed certificate; leaf
//! certificates are issued directly by an anchor (chain depth is exactly
//! anchor → leaf).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod armor;
pub mod cert;
pub mod error;
pub mod identity;
pub mod trust;

pub use cert::Certificate;
pub use error::IdentityError;
pub use identity::Identity;
pub use trust::TrustAnchorSet;
