//! Frame send/receive over async byte streams.
//!
//! Wire layout per frame, all multi-byte fields big-endian:
//!
//! ```text
//! +----------------+---------------------+
//! | length (4B BE) | payload (length B)  |
//! +----------------+---------------------+
//! ```
//!
//! A frame is written as one buffered write of prefix plus payload, so a
//! single writer never interleaves partial frames. Callers that could race
//! on one stream must serialize `send_frame` calls; the session layer does
//! this by owning its stream exclusively.
//!
//! The length prefix is validated against a caller-supplied maximum before
//! any payload allocation, bounding memory use against a hostile peer.

use crate::TransportError;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::trace;

/// Width of the frame length prefix in bytes.
pub const LEN_PREFIX_SIZE: usize = 4;

/// Default maximum frame size (1 MiB).
pub const DEFAULT_MAX_FRAME_SIZE: usize = 1024 * 1024;

/// Write one length-delimited frame.
///
/// # Errors
///
/// Returns [`TransportError::FrameTooLarge`] if `payload` exceeds
/// `max_frame_size` (nothing is written), or [`TransportError::Io`] on
/// stream failure.
pub async fn send_frame<W>(
    writer: &mut W,
    payload: &[u8],
    max_frame_size: usize,
) -> Result<(), TransportError>
where
    W: AsyncWrite + Unpin,
{
    // The 4-byte prefix caps frames at u32::MAX regardless of the
    // configured maximum
    let wire_max = max_frame_size.min(u32::MAX as usize);
    if payload.len() > wire_max {
        return Err(TransportError::FrameTooLarge {
            len: payload.len(),
            max: wire_max,
        });
    }

    // One contiguous write keeps prefix and payload atomic per call
    let mut frame = Vec::with_capacity(LEN_PREFIX_SIZE + payload.len());
    frame.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    frame.extend_from_slice(payload);

    writer.write_all(&frame).await?;
    writer.flush().await?;

    trace!(len = payload.len(), "sent frame");
    Ok(())
}

/// Read one length-delimited frame.
///
/// Blocks (yields) until the full frame arrives or the stream closes.
///
/// # Errors
///
/// - [`TransportError::FrameTooLarge`] if the declared length exceeds
///   `max_frame_size` (checked before allocating).
/// - [`TransportError::ConnectionClosed`] on EOF before a complete frame,
///   including EOF right after the length prefix.
/// - [`TransportError::Io`] on other stream failures.
pub async fn recv_frame<R>(reader: &mut R, max_frame_size: usize) -> Result<Vec<u8>, TransportError>
where
    R: AsyncRead + Unpin,
{
    let mut prefix = [0u8; LEN_PREFIX_SIZE];
    read_exact_or_closed(reader, &mut prefix).await?;

    let len = u32::from_be_bytes(prefix) as usize;
    if len > max_frame_size {
        return Err(TransportError::FrameTooLarge {
            len,
            max: max_frame_size,
        });
    }

    let mut payload = vec![0u8; len];
    read_exact_or_closed(reader, &mut payload).await?;

    trace!(len, "received frame");
    Ok(payload)
}

async fn read_exact_or_closed<R>(reader: &mut R, buf: &mut [u8]) -> Result<(), TransportError>
where
    R: AsyncRead + Unpin,
{
    match reader.read_exact(buf).await {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            Err(TransportError::ConnectionClosed)
        }
        Err(e) => Err(TransportError::Io(e)),
    }
}
