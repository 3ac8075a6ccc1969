//! # Quill Transport
//!
//! Length-delimited message framing over async byte streams.
//!
//! Converts a raw `AsyncRead`/`AsyncWrite` stream into discrete,
//! size-bounded messages: a 4-byte big-endian length prefix followed by
//! exactly that many payload bytes. Everything above this layer (handshake
//! messages, encrypted session frames) is an opaque payload here.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod error;
pub mod framing;

pub use error::TransportError;
pub use framing::{DEFAULT_MAX_FRAME_SIZE, LEN_PREFIX_SIZE, recv_frame, send_frame};
