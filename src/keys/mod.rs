//! Key material for HMAC signing and verification
//!
//! The signing key is an opaque byte string owned by the caller. It is wiped
//! from memory when dropped and never printed: its `Debug` output only shows
//! the key length.

use crate::error::{Error, Result};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Symmetric secret used by the HMAC algorithms
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    secret: Vec<u8>,
}

impl SecretKey {
    /// Create a new key from raw bytes
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Get the secret bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.secret
    }

    /// Number of bytes in the key
    pub fn len(&self) -> usize {
        self.secret.len()
    }

    /// Whether the key is empty
    pub fn is_empty(&self) -> bool {
        self.secret.is_empty()
    }

    /// Reject keys that cannot be used for signing
    pub(crate) fn ensure_usable(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::InvalidConfig("signing key must not be empty".into()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretKey(<redacted, {} bytes>)", self.secret.len())
    }
}

impl From<Vec<u8>> for SecretKey {
    fn from(secret: Vec<u8>) -> Self {
        Self::new(secret)
    }
}

impl From<&[u8]> for SecretKey {
    fn from(secret: &[u8]) -> Self {
        Self::new(secret.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for SecretKey {
    fn from(secret: &[u8; N]) -> Self {
        Self::new(secret.to_vec())
    }
}

impl From<String> for SecretKey {
    fn from(secret: String) -> Self {
        Self::new(secret.into_bytes())
    }
}

impl From<&str> for SecretKey {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes().to_vec())
    }
}
