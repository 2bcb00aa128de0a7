//! Algorithm identifiers and selection
//!
//! Tokens are signed with one of the HMAC-SHA2 algorithms. The identifier is
//! written to the `alg` header on issuance and must match the verifier's
//! configured algorithm on validation.

mod traits;

pub mod hmac;

pub use traits::{Signer, get_signer};

use crate::error::{Error, Result};
use crate::limits::MAX_ALG_LENGTH;
use std::str::FromStr;

/// Algorithm identifier from JWT header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlgorithmId {
    /// HMAC with SHA-256
    #[default]
    HS256,

    /// HMAC with SHA-384
    HS384,

    /// HMAC with SHA-512
    HS512,
}

impl AlgorithmId {
    /// All supported algorithms
    pub const ALL: [AlgorithmId; 3] = [AlgorithmId::HS256, AlgorithmId::HS384, AlgorithmId::HS512];

    /// Convert to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            AlgorithmId::HS256 => "HS256",
            AlgorithmId::HS384 => "HS384",
            AlgorithmId::HS512 => "HS512",
        }
    }

    /// Length in bytes of the MAC this algorithm produces
    pub const fn output_len(&self) -> usize {
        match self {
            AlgorithmId::HS256 => 32,
            AlgorithmId::HS384 => 48,
            AlgorithmId::HS512 => 64,
        }
    }

    /// The signer implementing this algorithm
    pub fn signer(&self) -> &'static dyn Signer {
        get_signer(*self)
    }
}

impl FromStr for AlgorithmId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() > MAX_ALG_LENGTH {
            return Err(Error::InvalidConfig(format!(
                "Algorithm string too long: {} bytes (maximum: {} bytes)",
                s.len(),
                MAX_ALG_LENGTH
            )));
        }

        match s {
            "HS256" => Ok(AlgorithmId::HS256),
            "HS384" => Ok(AlgorithmId::HS384),
            "HS512" => Ok(AlgorithmId::HS512),
            "none" => Err(Error::InvalidConfig(
                "the 'none' algorithm cannot sign tokens".into(),
            )),
            _ => Err(Error::InvalidConfig(format!(
                "Algorithm '{s}' is not supported"
            ))),
        }
    }
}

impl std::fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for AlgorithmId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// How an algorithm identifier string is resolved
///
/// `Strict` rejects unknown identifiers. `Lenient` maps them to HS256, which
/// is how older deployments of this token format behaved; a typo then silently
/// selects HS256, so it is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlgorithmSelection {
    #[default]
    Strict,
    Lenient,
}

impl AlgorithmSelection {
    /// Resolve an identifier string to an algorithm
    pub fn resolve(&self, name: &str) -> Result<AlgorithmId> {
        match (self, name.parse::<AlgorithmId>()) {
            (_, Ok(algorithm)) => Ok(algorithm),
            (AlgorithmSelection::Strict, Err(e)) => Err(e),
            (AlgorithmSelection::Lenient, Err(_)) => {
                tracing::warn!(
                    requested = %name.chars().take(MAX_ALG_LENGTH).collect::<String>(),
                    fallback = %AlgorithmId::HS256,
                    "unknown signing algorithm, falling back"
                );
                Ok(AlgorithmId::HS256)
            }
        }
    }
}
