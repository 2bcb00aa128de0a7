use crate::algorithm::{AlgorithmId, Signer};
use crate::error::{Error, Result};
use crate::keys::SecretKey;

use constant_time_eq::constant_time_eq;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

/// HS256 algorithm (HMAC with SHA-256)
pub struct HS256;

/// HS384 algorithm (HMAC with SHA-384)
pub struct HS384;

/// HS512 algorithm (HMAC with SHA-512)
pub struct HS512;

impl Signer for HS256 {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::HS256
    }

    fn sign(&self, message: &[u8], key: &SecretKey) -> Result<Vec<u8>> {
        compute_mac::<Hmac<Sha256>>(message, key.as_bytes())
    }

    fn verify(&self, signature: &[u8], message: &[u8], key: &SecretKey) -> bool {
        verify_mac::<Hmac<Sha256>>(signature, message, key.as_bytes())
    }
}

impl Signer for HS384 {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::HS384
    }

    fn sign(&self, message: &[u8], key: &SecretKey) -> Result<Vec<u8>> {
        compute_mac::<Hmac<Sha384>>(message, key.as_bytes())
    }

    fn verify(&self, signature: &[u8], message: &[u8], key: &SecretKey) -> bool {
        verify_mac::<Hmac<Sha384>>(signature, message, key.as_bytes())
    }
}

impl Signer for HS512 {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::HS512
    }

    fn sign(&self, message: &[u8], key: &SecretKey) -> Result<Vec<u8>> {
        compute_mac::<Hmac<Sha512>>(message, key.as_bytes())
    }

    fn verify(&self, signature: &[u8], message: &[u8], key: &SecretKey) -> bool {
        verify_mac::<Hmac<Sha512>>(signature, message, key.as_bytes())
    }
}

fn compute_mac<M: Mac + KeyInit>(message: &[u8], secret: &[u8]) -> Result<Vec<u8>> {
    let mut mac = <M as KeyInit>::new_from_slice(secret)
        .map_err(|_| Error::InvalidConfig("HMAC key rejected".into()))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Verify an HMAC signature with constant-time comparison
fn verify_mac<M: Mac + KeyInit>(signature: &[u8], message: &[u8], secret: &[u8]) -> bool {
    let Ok(expected) = compute_mac::<M>(message, secret) else {
        return false;
    };

    // Length is public (fixed per algorithm); only the contents are compared in constant time
    if signature.len() != expected.len() {
        return false;
    }

    constant_time_eq(signature, &expected)
}
