//! Secure random number generation.
//!
//! All randomness comes from the operating system CSPRNG.

use crate::{AEAD_NONCE_SIZE, CryptoError, HANDSHAKE_NONCE_SIZE};

/// Fill a buffer with random bytes from the OS CSPRNG.
///
/// # Errors
///
/// Returns [`CryptoError::RandomFailed`] if the underlying OS CSPRNG fails.
pub fn fill_random(buf: &mut [u8]) -> Result<(), CryptoError> {
    getrandom::getrandom(buf).map_err(|_| CryptoError::RandomFailed)
}

/// Generate a random 32-byte handshake nonce.
///
/// # Errors
///
/// Returns [`CryptoError::RandomFailed`] if the underlying OS CSPRNG fails.
pub fn handshake_nonce() -> Result<[u8; HANDSHAKE_NONCE_SIZE], CryptoError> {
    let mut buf = [0u8; HANDSHAKE_NONCE_SIZE];
    fill_random(&mut buf)?;
    Ok(buf)
}

/// Generate a random 12-byte AEAD nonce.
///
/// # Errors
///
/// Returns [`CryptoError::RandomFailed`] if the underlying OS CSPRNG fails.
pub fn aead_nonce() -> Result<[u8; AEAD_NONCE_SIZE], CryptoError> {
    let mut buf = [0u8; AEAD_NONCE_SIZE];
    fill_random(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_random_nonzero() {
        let mut buf = [0u8; 64];
        fill_random(&mut buf).unwrap();
        assert_ne!(buf, [0u8; 64]);
    }

    #[test]
    fn test_handshake_nonces_unique() {
        let a = handshake_nonce().unwrap();
        let b = handshake_nonce().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_aead_nonces_unique() {
        let a = aead_nonce().unwrap();
        let b = aead_nonce().unwrap();
        assert_ne!(a, b);
    }
}
