//! Errors for jwtseal
//!
//! Every failure on the issuance and verification paths is a returned
//! [`Error`]. Verification failures are expected outcomes, so they carry a
//! stable [`ErrorKind`] and a message suitable for handing back to a client.

use thiserror::Error;

/// jwtseal errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Structural Errors
    // ============================================================================
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Malformed claims: {0}")]
    MalformedClaims(String),

    // ============================================================================
    // Issuance / Configuration Errors
    // ============================================================================
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ============================================================================
    // Constraint Violations
    // ============================================================================
    #[error("The token is expired")]
    TokenExpired { expired_at: i64, now: i64 },

    #[error("The token was not issued by the given issuers")]
    IssuerMismatch {
        expected: String,
        found: Option<String>,
    },

    #[error("The token is not allowed to be used by this audience")]
    AudienceMismatch {
        expected: String,
        found: Vec<String>,
    },

    #[error("The token sign was invalid")]
    SignatureInvalid,

    #[error("Constraint '{constraint}' violated: {reason}")]
    ConstraintViolated { constraint: String, reason: String },
}

/// Discriminant of an [`Error`], without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedToken,
    MalformedClaims,
    InvalidConfig,
    TokenExpired,
    IssuerMismatch,
    AudienceMismatch,
    SignatureInvalid,
    ConstraintViolated,
}

impl Error {
    /// The kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedToken(_) => ErrorKind::MalformedToken,
            Error::MalformedClaims(_) => ErrorKind::MalformedClaims,
            Error::InvalidConfig(_) => ErrorKind::InvalidConfig,
            Error::TokenExpired { .. } => ErrorKind::TokenExpired,
            Error::IssuerMismatch { .. } => ErrorKind::IssuerMismatch,
            Error::AudienceMismatch { .. } => ErrorKind::AudienceMismatch,
            Error::SignatureInvalid => ErrorKind::SignatureInvalid,
            Error::ConstraintViolated { .. } => ErrorKind::ConstraintViolated,
        }
    }

    /// Whether the error was raised by a validation constraint rather than
    /// by decoding or configuration
    pub fn is_violation(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::TokenExpired
                | ErrorKind::IssuerMismatch
                | ErrorKind::AudienceMismatch
                | ErrorKind::SignatureInvalid
                | ErrorKind::ConstraintViolated
        )
    }
}

impl ErrorKind {
    /// Stable name of the kind, used in logs and serialized outcomes
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MalformedToken => "malformed_token",
            ErrorKind::MalformedClaims => "malformed_claims",
            ErrorKind::InvalidConfig => "invalid_config",
            ErrorKind::TokenExpired => "token_expired",
            ErrorKind::IssuerMismatch => "issuer_mismatch",
            ErrorKind::AudienceMismatch => "audience_mismatch",
            ErrorKind::SignatureInvalid => "signature_invalid",
            ErrorKind::ConstraintViolated => "constraint_violated",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result type alias for jwtseal operations
pub type Result<T> = std::result::Result<T, Error>;
