//! Encrypted session channel.
//!
//! After a successful handshake, a [`SecureChannel`] owns the stream and
//! the derived session key, and moves authenticated frames across it. Each
//! outgoing frame payload is `nonce(12) || ciphertext || tag`; nonces are
//! fresh CSPRNG output per frame.
//!
//! Decryption failure is fatal: a forged or corrupted frame poisons the
//! channel and every later call fails with [`SessionError::Closed`]. A
//! frame is never skipped or retried.

use crate::SessionError;
use quill_crypto::SessionKey;
use quill_transport::{DEFAULT_MAX_FRAME_SIZE, recv_frame, send_frame};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, trace};

/// An authenticated, encrypted channel over one stream.
///
/// Exclusively owned by its connection task; `&mut self` on both
/// directions serializes all writes to the underlying stream.
pub struct SecureChannel<S> {
    stream: S,
    key: SessionKey,
    max_frame_size: usize,
    poisoned: bool,
    frames_sent: u64,
    frames_received: u64,
}

impl<S> SecureChannel<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wrap a stream and the session key produced by the handshake.
    #[must_use]
    pub fn new(stream: S, key: SessionKey) -> Self {
        Self::with_max_frame_size(stream, key, DEFAULT_MAX_FRAME_SIZE)
    }

    /// Wrap with an explicit frame-size bound (must match the peer's).
    #[must_use]
    pub fn with_max_frame_size(stream: S, key: SessionKey, max_frame_size: usize) -> Self {
        Self {
            stream,
            key,
            max_frame_size,
            poisoned: false,
            frames_sent: 0,
            frames_received: 0,
        }
    }

    /// Encrypt and send one application frame.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Closed`] if the channel is poisoned, or
    /// transport/crypto failures, which also poison the channel.
    pub async fn send(&mut self, plaintext: &[u8]) -> Result<(), SessionError> {
        self.check_open()?;

        let result = self.send_inner(plaintext).await;
        if result.is_err() {
            self.poisoned = true;
        }
        result
    }

    async fn send_inner(&mut self, plaintext: &[u8]) -> Result<(), SessionError> {
        let framed = self.key.seal(plaintext)?;
        send_frame(&mut self.stream, &framed, self.max_frame_size).await?;
        self.frames_sent += 1;
        trace!(len = plaintext.len(), "sent session frame");
        Ok(())
    }

    /// Receive and decrypt one application frame.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Decrypt`] if authentication fails — the
    /// channel is then poisoned and must be torn down — or
    /// [`SessionError::Transport`] on stream failure.
    pub async fn recv(&mut self) -> Result<Vec<u8>, SessionError> {
        self.check_open()?;

        let result = self.recv_inner().await;
        if result.is_err() {
            self.poisoned = true;
        }
        result
    }

    async fn recv_inner(&mut self) -> Result<Vec<u8>, SessionError> {
        let framed = recv_frame(&mut self.stream, self.max_frame_size).await?;
        let plaintext = self.key.open(&framed)?;
        self.frames_received += 1;
        trace!(len = plaintext.len(), "received session frame");
        Ok(plaintext)
    }

    fn check_open(&self) -> Result<(), SessionError> {
        if self.poisoned {
            debug!("rejected operation on poisoned channel");
            return Err(SessionError::Closed);
        }
        Ok(())
    }

    /// Frames successfully sent on this channel.
    #[must_use]
    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }

    /// Frames successfully received on this channel.
    #[must_use]
    pub fn frames_received(&self) -> u64 {
        self.frames_received
    }

    /// Tear down, returning the underlying stream.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.stream
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_crypto::AEAD_NONCE_SIZE;

    fn key() -> SessionKey {
        SessionKey::from_bytes([0x77u8; 32])
    }

    #[tokio::test]
    async fn test_send_recv_roundtrip() {
        let (a, b) = tokio::io::duplex(16 * 1024);
        let mut sender = SecureChannel::new(a, key());
        let mut receiver = SecureChannel::new(b, key());

        sender.send(b"ping").await.unwrap();
        assert_eq!(receiver.recv().await.unwrap(), b"ping");

        assert_eq!(sender.frames_sent(), 1);
        assert_eq!(receiver.frames_received(), 1);
    }

    #[tokio::test]
    async fn test_bidirectional() {
        let (a, b) = tokio::io::duplex(16 * 1024);
        let mut left = SecureChannel::new(a, key());
        let mut right = SecureChannel::new(b, key());

        left.send(b"ping").await.unwrap();
        assert_eq!(right.recv().await.unwrap(), b"ping");
        right.send(b"pong").await.unwrap();
        assert_eq!(left.recv().await.unwrap(), b"pong");
    }

    #[tokio::test]
    async fn test_wrong_key_poisons_channel() {
        let (a, b) = tokio::io::duplex(16 * 1024);
        let mut sender = SecureChannel::new(a, key());
        let mut receiver = SecureChannel::new(b, SessionKey::from_bytes([0x88u8; 32]));

        sender.send(b"secret").await.unwrap();
        sender.send(b"more").await.unwrap();

        assert!(matches!(
            receiver.recv().await,
            Err(SessionError::Decrypt(_))
        ));
        // Poisoned: the next (individually valid) frame is not processed
        assert!(matches!(receiver.recv().await, Err(SessionError::Closed)));
    }

    #[tokio::test]
    async fn test_tampered_frame_poisons_channel() {
        let (mut a, b) = tokio::io::duplex(16 * 1024);
        let mut receiver = SecureChannel::new(b, key());

        let mut framed = key().seal(b"application data").unwrap();
        framed[AEAD_NONCE_SIZE] ^= 0x01; // first ciphertext byte
        send_frame(&mut a, &framed, DEFAULT_MAX_FRAME_SIZE)
            .await
            .unwrap();

        assert!(matches!(
            receiver.recv().await,
            Err(SessionError::Decrypt(_))
        ));
    }

    #[tokio::test]
    async fn test_peer_close_is_transport_error() {
        let (a, b) = tokio::io::duplex(16 * 1024);
        let mut receiver = SecureChannel::new(b, key());
        drop(a);

        assert!(matches!(
            receiver.recv().await,
            Err(SessionError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_frame() {
        let (a, b) = tokio::io::duplex(16 * 1024);
        let mut sender = SecureChannel::new(a, key());
        let mut receiver = SecureChannel::new(b, key());

        sender.send(b"").await.unwrap();
        assert_eq!(receiver.recv().await.unwrap(), b"");
    }
}
