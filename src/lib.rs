//! # jwtseal - HMAC JSON Web Tokens with ordered constraints
//!
//! > Issue and verify HMAC-signed JSON Web Tokens (JWT) in Rust.
//!
//! **jwtseal** covers the part of token handling with real security
//! consequences: canonical encoding of header and payload, HMAC signing,
//! constant-time signature verification, and claim validation through an
//! explicit, ordered set of constraints.
//!
//! ## Overview
//!
//! A token is three Base64URL segments joined by dots: a JSON header naming
//! the algorithm, a JSON payload of claims, and a MAC over the first two
//! segments. Issuance builds the claims from an immutable [`IssueConfig`];
//! verification parses the string into a [`Token`] and runs it through a
//! [`Validator`] against a [`ValidationContext`] (expected issuer, expected
//! audience, current time).
//!
//! Verification never panics and never throws: every failure is a returned
//! [`Error`] with a stable [`ErrorKind`], and [`verify`] folds the whole flow
//! into a [`Verification`] value.
//!
//! ## Quick Start
//!
//! ```ignore
//! use jwtseal::*;
//!
//! let token = TokenBuilder::new(
//!     IssueConfig::new("svc-a", "secret")
//!         .audience("svc-b")
//!         .expires_in(3600)
//!         .claim("uid", "42"),
//! )
//! .build()?;
//!
//! let claims = Validator::new().validate_str(
//!     &token,
//!     &ValidationContext::new("svc-a", "svc-b"),
//!     &SecretKey::from("secret"),
//! )?;
//!
//! assert_eq!(claims.get_str("uid"), Some("42"));
//! ```
//!
//! ## Validation Order
//!
//! ```text
//! &str
//!     │ codec::parse        MalformedToken / MalformedClaims
//!     ▼
//! Token (parsed, not authenticated)
//!     │ SignedWith           SignatureInvalid
//!     │ NotExpired           TokenExpired
//!     │ IssuedBy             IssuerMismatch
//!     │ PermittedFor         AudienceMismatch
//!     │ custom constraints   ConstraintViolated
//!     ▼
//! ClaimSet (all claims)
//! ```
//!
//! Only the first violation is reported.
//!
//! ## Algorithm Support
//!
//! HS256, HS384 and HS512. The verifier checks with the algorithm configured
//! in its [`ValidationContext`]; a token whose `alg` header names anything
//! else (including `"none"`) fails signature verification.
//!
//! Identifier strings resolve through [`AlgorithmSelection`]: `Strict`
//! rejects unknown names, `Lenient` falls back to HS256 and logs a warning.
//!
//! ## Security
//!
//! - Signatures are compared with [`constant_time_eq`](https://crates.io/crates/constant_time_eq).
//! - The signature is computed over the exact received segments, never over
//!   re-serialized JSON.
//! - [`SecretKey`] is zeroized on drop and redacted in `Debug` output.
//! - Input sizes are bounded before decoding.
//!
//! ## References
//!
//! - [RFC 7515](https://datatracker.ietf.org/doc/html/rfc7515) JSON Web Signature (JWS)
//! - [RFC 7519](https://datatracker.ietf.org/doc/html/rfc7519) JSON Web Token (JWT)
//! - [RFC 8725](https://datatracker.ietf.org/doc/html/rfc8725) JSON Web Token Best Current Practices

// Core modules
pub mod clock;
pub mod error;
pub mod limits;
pub mod utils;

// Algorithm system
pub mod algorithm;
pub mod keys;

// Encoding
pub mod codec;

// Claims and constraints
pub mod claims;

// Token types
pub mod token;

// Issuance and validation (main public API)
pub mod builder;
pub mod validator;

// ============================================================================
// PUBLIC API
// ============================================================================

// Issuance
pub use builder::{IssueConfig, TokenBuilder, new_token};

// Validation
pub use validator::{ValidationContext, Validator, Verification, validate, verify};

// Supporting types
pub use algorithm::{AlgorithmId, AlgorithmSelection};
pub use claims::{Audience, ClaimSet, Constraint};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Error, ErrorKind, Result};
pub use keys::SecretKey;
pub use token::{Token, TokenHeader};
