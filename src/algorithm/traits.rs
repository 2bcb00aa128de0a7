use crate::algorithm::AlgorithmId;
use crate::error::Result;
use crate::keys::SecretKey;

/// Core algorithm trait that all JWT signature algorithms implement
///
/// Signers are stateless: the key is passed in per call and never retained.
/// New algorithm families plug in by implementing this trait and extending
/// [`get_signer`].
pub trait Signer: Send + Sync {
    /// The algorithm this signer implements
    fn id(&self) -> AlgorithmId;

    /// Compute the signature over `message`
    ///
    /// Deterministic: the same message and key always yield the same bytes.
    fn sign(&self, message: &[u8], key: &SecretKey) -> Result<Vec<u8>>;

    /// Check `signature` against `message` in constant time
    ///
    /// Returns `false` for signatures of the wrong length instead of failing.
    fn verify(&self, signature: &[u8], message: &[u8], key: &SecretKey) -> bool;
}

/// Get the signer for the given algorithm ID
pub fn get_signer(algorithm: AlgorithmId) -> &'static dyn Signer {
    match algorithm {
        AlgorithmId::HS256 => &super::hmac::HS256,
        AlgorithmId::HS384 => &super::hmac::HS384,
        AlgorithmId::HS512 => &super::hmac::HS512,
    }
}
