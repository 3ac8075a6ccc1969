//! Trust-anchor sets and peer-certificate validation.

use crate::{Certificate, IdentityError, armor};
use std::path::Path;
use tracing::{debug, warn};

/// An immutable set of trust anchors (self-signed certificates).
///
/// Loaded once and shared read-only across connection tasks. A peer
/// certificate is trusted iff it is one of the anchors, or it was issued
/// directly by one of them (chain depth is exactly anchor → leaf).
pub struct TrustAnchorSet {
    anchors: Vec<Certificate>,
}

impl TrustAnchorSet {
    /// Build a set from certificates, checking each anchor's
    /// self-signature.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::UntrustedAnchor`] if a certificate is not
    /// self-signed or fails its own signature check.
    pub fn from_certificates(certs: Vec<Certificate>) -> Result<Self, IdentityError> {
        for cert in &certs {
            let self_consistent = cert.is_self_signed()
                && cert
                    .public_key()
                    .is_ok_and(|key| cert.verify_signed_by(&key).is_ok());
            if !self_consistent {
                return Err(IdentityError::UntrustedAnchor(cert.subject().to_owned()));
            }
        }
        Ok(Self { anchors: certs })
    }

    /// Load a bundle of armored anchor certificates from one file.
    ///
    /// # Errors
    ///
    /// Fails with [`IdentityError`] on I/O, armor, or anchor-consistency
    /// problems.
    pub fn load(bundle_path: &Path) -> Result<Self, IdentityError> {
        let text = std::fs::read_to_string(bundle_path)?;
        let blocks = armor::decode_all(armor::CERTIFICATE_TAG, &text)?;
        let certs = blocks
            .iter()
            .map(|block| Certificate::from_bytes(block))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(anchors = certs.len(), "loaded trust anchor bundle");
        Self::from_certificates(certs)
    }

    /// Number of anchors in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Whether the set is empty (nothing can be trusted).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Validate a peer certificate against this anchor set.
    ///
    /// Returns `true` iff the certificate is byte-identical to an anchor,
    /// or names an anchor as issuer and carries that anchor's valid
    /// signature. Never grants partial trust: any parse or verification
    /// failure is simply `false`.
    #[must_use]
    pub fn verify(&self, cert: &Certificate) -> bool {
        for anchor in &self.anchors {
            if cert == anchor {
                return true;
            }
            if cert.issuer() != anchor.subject() {
                continue;
            }
            match anchor.public_key() {
                Ok(anchor_key) => {
                    if cert.verify_signed_by(&anchor_key).is_ok() {
                        return true;
                    }
                }
                Err(_) => {
                    warn!(anchor = anchor.subject(), "anchor key failed to parse");
                }
            }
        }
        false
    }
}
