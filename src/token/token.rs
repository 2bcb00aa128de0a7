//! Parsed token representation
//!
//! A [`Token`] is the decoded form of a compact-serialized JWT. It keeps the
//! exact encoded string it was parsed from, because the signature covers those
//! bytes and not any re-serialization of the header or claims.

use crate::claims::ClaimSet;
use crate::codec;
use crate::error::Result;
use crate::token::TokenHeader;

/// A parsed, not yet validated JWT
///
/// Immutable once parsed. Holding a `Token` says nothing about its
/// authenticity: run it through a [`Validator`](crate::Validator) before
/// trusting any claim.
#[derive(Debug, Clone)]
pub struct Token {
    header: TokenHeader,
    claims: ClaimSet,
    signature: Vec<u8>,
    encoded: String,
    signing_input_len: usize,
}

impl Token {
    /// Parse a JWT from its compact serialization
    pub fn parse(token: &str) -> Result<Self> {
        codec::parse(token)
    }

    pub(crate) fn from_parts(
        header: TokenHeader,
        claims: ClaimSet,
        signature: Vec<u8>,
        encoded: String,
        signing_input_len: usize,
    ) -> Self {
        Self {
            header,
            claims,
            signature,
            encoded,
            signing_input_len,
        }
    }

    /// Get the token header
    pub fn header(&self) -> &TokenHeader {
        &self.header
    }

    /// Get all claims
    pub fn claims(&self) -> &ClaimSet {
        &self.claims
    }

    /// Take ownership of the claims
    pub fn into_claims(self) -> ClaimSet {
        self.claims
    }

    /// Raw signature bytes
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// The signed bytes: encoded header, '.', encoded payload, exactly as received
    pub fn signing_input(&self) -> &str {
        &self.encoded[..self.signing_input_len]
    }

    /// Encoded header segment
    pub fn encoded_header(&self) -> &str {
        self.segments().0
    }

    /// Encoded payload segment
    pub fn encoded_payload(&self) -> &str {
        self.segments().1
    }

    /// Encoded signature segment
    pub fn encoded_signature(&self) -> &str {
        &self.encoded[self.signing_input_len + 1..]
    }

    /// The full compact serialization this token was parsed from
    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    fn segments(&self) -> (&str, &str) {
        self.signing_input()
            .split_once('.')
            .unwrap_or((self.signing_input(), ""))
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encoded)
    }
}
