use crate::algorithm::AlgorithmId;
use serde::{Deserialize, Serialize};

/// JWT header structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    /// Algorithm used for signing
    #[serde(rename = "alg")]
    pub algorithm: String,

    /// Token type (typically "JWT")
    #[serde(rename = "typ", default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,

    /// Key ID
    #[serde(rename = "kid", default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
}

impl TokenHeader {
    /// Header written on issuance: `{"alg":"<alg>","typ":"JWT"}`
    pub fn new(algorithm: AlgorithmId) -> Self {
        Self {
            algorithm: algorithm.as_str().to_string(),
            token_type: Some("JWT".to_string()),
            key_id: None,
        }
    }

    /// Get algorithm as string
    pub fn algorithm_str(&self) -> &str {
        &self.algorithm
    }

    /// Parse algorithm from header
    pub fn algorithm(&self) -> Option<AlgorithmId> {
        self.algorithm.parse().ok()
    }

    /// Get key ID if present
    pub fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }
}
