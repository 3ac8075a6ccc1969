//! # Quill Core
//!
//! Handshake state machine and encrypted session channel for the Quill
//! protocol.
//!
//! This crate provides:
//! - Handshake wire messages (version-prefixed binary encoding)
//! - The shared transcript construction both roles sign and verify
//! - [`perform_handshake`]: the mutual-authentication exchange, yielding a
//!   session key
//! - [`SecureChannel`]: authenticated encryption of application frames
//!   after the handshake
//!
//! ## Protocol Flow
//!
//! ```text
//! Initiator                         Responder
//!     |        <---- nonce ----         |
//!     |  -- cert, eph_i, sig_i ---->    |
//!     |  <--- cert, eph_r, sig_r --     |
//!     |                                 |
//!   derive key                      derive key
//!     |  ===== encrypted frames =====   |
//! ```
//!
//! `sig_i` covers `nonce || eph_i`; `sig_r` covers `nonce || eph_i || eph_r`.
//! Any validation failure on either side is fatal to the handshake; the
//! caller must close the connection.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod channel;
pub mod error;
pub mod handshake;
pub mod messages;
pub mod transcript;

pub use channel::SecureChannel;
pub use error::{HandshakeError, SessionError};
pub use handshake::{HandshakeConfig, HandshakeState, Role, perform_handshake};
pub use messages::{HandshakeMessage, PROTOCOL_VERSION};
