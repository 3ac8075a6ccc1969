//! The mutual-authentication handshake state machine.
//!
//! Both roles run the same exchange from opposite ends:
//! `Start → NonceExchanged → CredentialsExchanged → KeyDerived`, with any
//! validation failure terminating in `Failed`. Failures are fatal and
//! non-retryable at this layer; the caller must close the connection. No
//! partial trust is ever granted: a peer is either fully validated
//! (certificate chain and transcript signature) or rejected.
//!
//! Every receive is bounded by [`HandshakeConfig::recv_timeout`] so a
//! stalled or hostile peer cannot hold a connection task indefinitely.

use crate::messages::HandshakeMessage;
use crate::{HandshakeError, transcript};
use quill_crypto::kex::{EphemeralPrivateKey, PeerPublicKey};
use quill_crypto::{HANDSHAKE_NONCE_SIZE, SessionKey, X25519_PUBLIC_KEY_SIZE, kdf, random};
use quill_identity::{Identity, TrustAnchorSet};
use quill_transport::{DEFAULT_MAX_FRAME_SIZE, recv_frame, send_frame};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

/// KDF context string for session-key derivation.
const SESSION_KEY_INFO: &[u8] = b"quill-session-key-v1";

/// Which end of the handshake this endpoint plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Connects out; receives the nonce, sends credentials first.
    Initiator,
    /// Accepts; sends the nonce, validates credentials first.
    Responder,
}

/// Handshake progress, reported in tracing events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandshakeState {
    /// Nothing exchanged yet
    Start,
    /// Nonce frame sent (responder) or received (initiator)
    NonceExchanged,
    /// Both credential frames sent/received and validated
    CredentialsExchanged,
    /// Session key derived; terminal success
    KeyDerived,
    /// Terminal failure; connection must be closed
    Failed,
}

/// Per-handshake configuration, passed explicitly by the caller.
#[derive(Clone, Debug)]
pub struct HandshakeConfig {
    /// Bound on each individual receive during the handshake
    pub recv_timeout: Duration,
    /// Maximum accepted frame size
    pub max_frame_size: usize,
}

impl Default for HandshakeConfig {
    fn default() -> Self {
        Self {
            recv_timeout: Duration::from_secs(10),
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        }
    }
}

/// Run the handshake over `stream`, yielding the derived session key.
///
/// Used identically by accepting servers (`Role::Responder`) and outbound
/// clients (`Role::Initiator`). The identity and trust anchors are shared
/// read-only state; everything else lives on this connection's task.
///
/// # Errors
///
/// Any [`HandshakeError`] is fatal: the caller must drop the stream.
/// [`HandshakeError::is_peer_rejection`] distinguishes identity rejection
/// from transport trouble.
pub async fn perform_handshake<S>(
    role: Role,
    stream: &mut S,
    identity: &Identity,
    trust_anchors: &TrustAnchorSet,
    config: &HandshakeConfig,
) -> Result<SessionKey, HandshakeError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let result = match role {
        Role::Initiator => run_initiator(stream, identity, trust_anchors, config).await,
        Role::Responder => run_responder(stream, identity, trust_anchors, config).await,
    };

    match &result {
        Ok(_) => debug!(?role, state = ?HandshakeState::KeyDerived, "handshake complete"),
        Err(e) => debug!(
            ?role,
            state = ?HandshakeState::Failed,
            peer_rejected = e.is_peer_rejection(),
            error = %e,
            "handshake failed"
        ),
    }
    result
}

async fn run_responder<S>(
    stream: &mut S,
    identity: &Identity,
    trust_anchors: &TrustAnchorSet,
    config: &HandshakeConfig,
) -> Result<SessionKey, HandshakeError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let nonce = random::handshake_nonce()?;
    send_message(stream, &HandshakeMessage::Nonce { nonce }, config).await?;
    debug!(state = ?HandshakeState::NonceExchanged, "sent nonce");

    let (peer_ephemeral, _) = recv_validated_credential(
        stream,
        trust_anchors,
        config,
        |ephemeral_public| transcript::initiator(&nonce, ephemeral_public),
    )
    .await?;

    let ephemeral = EphemeralPrivateKey::generate();
    let our_ephemeral = ephemeral.public_key().to_bytes();

    let our_transcript = transcript::responder(&nonce, &peer_ephemeral, &our_ephemeral);
    let signature = identity.signing_key().sign(&our_transcript)?;
    send_message(
        stream,
        &HandshakeMessage::Credential {
            certificate: identity.certificate().clone(),
            ephemeral_public: our_ephemeral,
            signature,
        },
        config,
    )
    .await?;
    debug!(state = ?HandshakeState::CredentialsExchanged, "credentials exchanged");

    derive_key(ephemeral, &peer_ephemeral, &nonce)
}

async fn run_initiator<S>(
    stream: &mut S,
    identity: &Identity,
    trust_anchors: &TrustAnchorSet,
    config: &HandshakeConfig,
) -> Result<SessionKey, HandshakeError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let nonce = match recv_message(stream, config).await? {
        HandshakeMessage::Nonce { nonce } => nonce,
        HandshakeMessage::Credential { .. } => {
            return Err(HandshakeError::UnexpectedMessage { expected: "Nonce" });
        }
    };
    debug!(state = ?HandshakeState::NonceExchanged, "received nonce");

    let ephemeral = EphemeralPrivateKey::generate();
    let our_ephemeral = ephemeral.public_key().to_bytes();

    let our_transcript = transcript::initiator(&nonce, &our_ephemeral);
    let signature = identity.signing_key().sign(&our_transcript)?;
    send_message(
        stream,
        &HandshakeMessage::Credential {
            certificate: identity.certificate().clone(),
            ephemeral_public: our_ephemeral,
            signature,
        },
        config,
    )
    .await?;

    let (peer_ephemeral, _) = recv_validated_credential(
        stream,
        trust_anchors,
        config,
        |ephemeral_public| transcript::responder(&nonce, &our_ephemeral, ephemeral_public),
    )
    .await?;
    debug!(state = ?HandshakeState::CredentialsExchanged, "credentials exchanged");

    derive_key(ephemeral, &peer_ephemeral, &nonce)
}

/// Receive a credential frame and fully validate it: trust-store check,
/// then transcript-signature verification under the certified key.
///
/// `build_transcript` receives the peer's ephemeral public key and returns
/// the transcript bytes that peer must have signed.
async fn recv_validated_credential<S, F>(
    stream: &mut S,
    trust_anchors: &TrustAnchorSet,
    config: &HandshakeConfig,
    build_transcript: F,
) -> Result<([u8; X25519_PUBLIC_KEY_SIZE], quill_identity::Certificate), HandshakeError>
where
    S: AsyncRead + Unpin,
    F: FnOnce(&[u8; X25519_PUBLIC_KEY_SIZE]) -> Vec<u8>,
{
    let (certificate, ephemeral_public, signature) = match recv_message(stream, config).await? {
        HandshakeMessage::Credential {
            certificate,
            ephemeral_public,
            signature,
        } => (certificate, ephemeral_public, signature),
        HandshakeMessage::Nonce { .. } => {
            return Err(HandshakeError::UnexpectedMessage {
                expected: "Credential",
            });
        }
    };

    if !trust_anchors.verify(&certificate) {
        return Err(HandshakeError::CertificateChainInvalid);
    }
    let peer_key = certificate
        .public_key()
        .map_err(|_| HandshakeError::InvalidPeerCertificateKey)?;

    let expected_transcript = build_transcript(&ephemeral_public);
    peer_key
        .verify(&expected_transcript, &signature)
        .map_err(|_| HandshakeError::SignatureInvalid)?;

    debug!(peer = certificate.subject(), "peer credential validated");
    Ok((ephemeral_public, certificate))
}

fn derive_key(
    ephemeral: EphemeralPrivateKey,
    peer_ephemeral: &[u8; X25519_PUBLIC_KEY_SIZE],
    nonce: &[u8; HANDSHAKE_NONCE_SIZE],
) -> Result<SessionKey, HandshakeError> {
    let shared = ephemeral
        .exchange(&PeerPublicKey::from_bytes(*peer_ephemeral))
        .map_err(|_| HandshakeError::InvalidPeerKey)?;
    Ok(kdf::derive_session_key(&shared, nonce, SESSION_KEY_INFO))
}

async fn send_message<S>(
    stream: &mut S,
    message: &HandshakeMessage,
    config: &HandshakeConfig,
) -> Result<(), HandshakeError>
where
    S: AsyncWrite + Unpin,
{
    let payload = message.encode()?;
    send_frame(stream, &payload, config.max_frame_size).await?;
    Ok(())
}

async fn recv_message<S>(
    stream: &mut S,
    config: &HandshakeConfig,
) -> Result<HandshakeMessage, HandshakeError>
where
    S: AsyncRead + Unpin,
{
    let payload = tokio::time::timeout(
        config.recv_timeout,
        recv_frame(stream, config.max_frame_size),
    )
    .await
    .map_err(|_| HandshakeError::Timeout)??;
    HandshakeMessage::decode(&payload)
}
