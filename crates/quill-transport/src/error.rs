//! Transport layer errors.

use thiserror::Error;

/// Frame transport errors
#[derive(Debug, Error)]
pub enum TransportError {
    /// Declared or requested frame length exceeds the configured maximum
    #[error("frame too large: {len} bytes exceeds maximum {max}")]
    FrameTooLarge {
        /// Declared frame length
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// Stream closed before a complete frame was transferred
    #[error("connection closed mid-frame")]
    ConnectionClosed,

    /// I/O error from the underlying stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
