//! Compact certificate format.
//!
//! A certificate binds a subject name to a signature public key and names
//! the issuer that vouches for the binding. The issuer's signature covers
//! the deterministic binary encoding of the to-be-signed fields.
//!
//! ## Serialized Format
//!
//! ```text
//! +---------------------------------------------------+-----------------+
//! | to-be-signed: version (1B) | subject | issuer     | issuer signature|
//! |               algorithm tag | public key bytes    |                 |
//! +---------------------------------------------------+-----------------+
//! ```
//!
//! Anchors are self-signed (subject == issuer, signature verifies under the
//! certificate's own key). A certificate is never trusted on parse; trust
//! is the [`crate::TrustAnchorSet`]'s decision.

use crate::{IdentityError, armor};
use quill_crypto::{CryptoError, KeyAlgorithm, SigningKey, VerifyingKey};
use serde::{Deserialize, Serialize};

/// Current certificate format version.
const FORMAT_VERSION: u8 = 1;

/// Fields covered by the issuer's signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct TbsCertificate {
    version: u8,
    subject: String,
    issuer: String,
    algorithm: KeyAlgorithm,
    public_key: Vec<u8>,
}

/// A subject-to-key binding vouched for by an issuer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    tbs: TbsCertificate,
    signature: Vec<u8>,
}

impl Certificate {
    /// Issue a certificate for `subject_key`, signed by `issuer_key`.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Crypto`] if the subject key cannot be
    /// encoded or the issuer signature fails.
    pub fn issue(
        subject: &str,
        subject_key: &VerifyingKey,
        issuer: &str,
        issuer_key: &SigningKey,
    ) -> Result<Self, IdentityError> {
        let tbs = TbsCertificate {
            version: FORMAT_VERSION,
            subject: subject.to_owned(),
            issuer: issuer.to_owned(),
            algorithm: subject_key.algorithm(),
            public_key: subject_key.to_bytes()?,
        };
        let signature = issuer_key.sign(&tbs.encode()?)?;
        Ok(Self { tbs, signature })
    }

    /// Issue a self-signed certificate (a trust anchor).
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Crypto`] on encoding or signing failure.
    pub fn self_signed(subject: &str, key: &SigningKey) -> Result<Self, IdentityError> {
        Self::issue(subject, &key.verifying_key(), subject, key)
    }

    /// Subject name.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.tbs.subject
    }

    /// Issuer name.
    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.tbs.issuer
    }

    /// Algorithm of the certified public key.
    #[must_use]
    pub fn algorithm(&self) -> KeyAlgorithm {
        self.tbs.algorithm
    }

    /// Whether subject and issuer coincide (anchor shape; says nothing
    /// about signature validity).
    #[must_use]
    pub fn is_self_signed(&self) -> bool {
        self.tbs.subject == self.tbs.issuer
    }

    /// Parse the certified public key.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidPublicKey`] if the embedded key bytes
    /// do not decode under the declared algorithm.
    pub fn public_key(&self) -> Result<VerifyingKey, CryptoError> {
        VerifyingKey::from_bytes(self.tbs.algorithm, &self.tbs.public_key)
    }

    /// Verify this certificate's signature under `issuer_key`.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Crypto`] with
    /// [`CryptoError::InvalidSignature`] if the signature does not verify.
    pub fn verify_signed_by(&self, issuer_key: &VerifyingKey) -> Result<(), IdentityError> {
        issuer_key.verify(&self.tbs.encode()?, &self.signature)?;
        Ok(())
    }

    /// Serialize to the compact binary form.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Malformed`] if encoding fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, IdentityError> {
        bincode::serialize(self).map_err(|_| IdentityError::Malformed("certificate"))
    }

    /// Deserialize from the compact binary form.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Malformed`] on decode failure or an
    /// unsupported format version.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, IdentityError> {
        let cert: Self =
            bincode::deserialize(bytes).map_err(|_| IdentityError::Malformed("certificate"))?;
        if cert.tbs.version != FORMAT_VERSION {
            return Err(IdentityError::Malformed("certificate version"));
        }
        Ok(cert)
    }

    /// Serialize to an armored text block.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Malformed`] if encoding fails.
    pub fn to_armored(&self) -> Result<String, IdentityError> {
        Ok(armor::encode(armor::CERTIFICATE_TAG, &self.to_bytes()?))
    }

    /// Parse a single armored certificate block.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Armor`] or [`IdentityError::Malformed`] on
    /// bad input.
    pub fn from_armored(text: &str) -> Result<Self, IdentityError> {
        Self::from_bytes(&armor::decode_one(armor::CERTIFICATE_TAG, text)?)
    }
}

impl TbsCertificate {
    fn encode(&self) -> Result<Vec<u8>, IdentityError> {
        bincode::serialize(self).map_err(|_| IdentityError::Malformed("certificate"))
    }
}
