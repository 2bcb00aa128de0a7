//! Token validation
//!
//! A [`Validator`] evaluates an ordered list of [`Constraint`]s against a
//! parsed [`Token`] and reports the first violation. The built-in constraints
//! always run, in this order:
//!
//! 1. [`SignedWith`]: the signature matches the encoded header and payload
//! 2. [`NotExpired`]: `now < exp + leeway`
//! 3. [`IssuedBy`]: `iss` equals the expected issuer
//! 4. [`PermittedFor`]: the expected audience is a member of `aud`
//!
//! Caller-supplied constraints run after the built-ins. Claims are never
//! inspected before the signature has been checked.
//!
//! Failures are values, not panics: [`Validator::validate`] returns
//! `Result<ClaimSet>`, and [`verify`] folds the whole flow into a
//! [`Verification`] that serializes to `{"result": .., "data": ..}`.

use crate::algorithm::AlgorithmId;
use crate::claims::{ClaimSet, Constraint, IssuedBy, NotExpired, PermittedFor, SignedWith};
use crate::clock::{Clock, SystemClock};
use crate::codec;
use crate::error::{ErrorKind, Result};
use crate::keys::SecretKey;
use crate::token::Token;
use crate::utils::bounds::validate_leeway;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// What a token is checked against
///
/// Built with consuming setters. The current time defaults to the system
/// clock at construction; pin it with [`at`](Self::at) or
/// [`clock`](Self::clock) for deterministic checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationContext {
    issuer: String,
    audience: Option<String>,
    now: i64,
    leeway: u64,
    algorithm: AlgorithmId,
}

impl ValidationContext {
    /// Expect tokens issued by `issuer` for `audience`
    pub fn new(issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            audience: Some(audience.into()),
            ..Self::for_issuer(issuer)
        }
    }

    /// Expect tokens issued by `issuer`, for any audience
    pub fn for_issuer(issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            audience: None,
            now: SystemClock.now(),
            leeway: 0,
            algorithm: AlgorithmId::default(),
        }
    }

    /// Check as of a fixed Unix timestamp
    pub fn at(mut self, now: i64) -> Self {
        self.now = now;
        self
    }

    /// Check as of the clock's current time
    pub fn clock(mut self, clock: &impl Clock) -> Self {
        self.now = clock.now();
        self
    }

    /// Accept tokens up to `seconds` past `exp` (at most 300)
    pub fn leeway(mut self, seconds: u64) -> Self {
        self.leeway = seconds;
        self
    }

    /// Algorithm the signature must have been produced with
    pub fn algorithm(mut self, algorithm: AlgorithmId) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn now(&self) -> i64 {
        self.now
    }

    pub fn leeway_seconds(&self) -> u64 {
        self.leeway
    }

    pub fn expected_algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    pub fn expected_issuer(&self) -> &str {
        &self.issuer
    }

    pub fn expected_audience(&self) -> Option<&str> {
        self.audience.as_deref()
    }
}

/// Ordered constraint evaluation
#[derive(Default)]
pub struct Validator {
    constraints: Vec<Box<dyn Constraint>>,
}

impl Validator {
    /// Validator running only the built-in constraints
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a constraint evaluated after the built-ins
    pub fn with_constraint(mut self, constraint: impl Constraint + 'static) -> Self {
        self.constraints.push(Box::new(constraint));
        self
    }

    /// Check `token` and return its full claim set, or the first violation
    pub fn validate(
        &self,
        token: &Token,
        context: &ValidationContext,
        key: &SecretKey,
    ) -> Result<ClaimSet> {
        validate_leeway(context.leeway_seconds())?;
        key.ensure_usable()?;

        check(&SignedWith::new(key), token, context)?;
        check(&NotExpired, token, context)?;
        check(&IssuedBy, token, context)?;
        check(&PermittedFor, token, context)?;
        for constraint in &self.constraints {
            check(&**constraint, token, context)?;
        }

        Ok(token.claims().clone())
    }

    /// Parse and check a compact-serialized token
    pub fn validate_str(
        &self,
        token: &str,
        context: &ValidationContext,
        key: &SecretKey,
    ) -> Result<ClaimSet> {
        let token = codec::parse(token)?;
        self.validate(&token, context, key)
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field(
                "constraints",
                &self.constraints.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

fn check(constraint: &dyn Constraint, token: &Token, context: &ValidationContext) -> Result<()> {
    constraint.assert(token, context).inspect_err(|error| {
        tracing::debug!(
            constraint = constraint.name(),
            kind = %error.kind(),
            "token rejected"
        );
    })
}

/// Check `token` with the built-in constraints only
pub fn validate(token: &Token, context: &ValidationContext, key: &SecretKey) -> Result<ClaimSet> {
    Validator::new().validate(token, context, key)
}

/// Parse and check a token, folding every failure into a [`Verification`]
pub fn verify(token: &str, context: &ValidationContext, key: &SecretKey) -> Verification {
    Validator::new().validate_str(token, context, key).into()
}

/// Outcome of verifying a token
///
/// Serializes as `{"result":true,"data":{..claims}}` or
/// `{"result":false,"data":{"errorMsg":".."}}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Verification {
    Valid(ClaimSet),
    Invalid { kind: ErrorKind, message: String },
}

impl Verification {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verification::Valid(_))
    }

    /// Claims of a valid token
    pub fn claims(&self) -> Option<&ClaimSet> {
        match self {
            Verification::Valid(claims) => Some(claims),
            Verification::Invalid { .. } => None,
        }
    }

    /// Kind of the violation, if any
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Verification::Valid(_) => None,
            Verification::Invalid { kind, .. } => Some(*kind),
        }
    }

    /// Human-readable message of the violation, if any
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Verification::Valid(_) => None,
            Verification::Invalid { message, .. } => Some(message),
        }
    }
}

impl From<Result<ClaimSet>> for Verification {
    fn from(result: Result<ClaimSet>) -> Self {
        match result {
            Ok(claims) => Verification::Valid(claims),
            Err(error) => Verification::Invalid {
                kind: error.kind(),
                message: error.to_string(),
            },
        }
    }
}

impl Serialize for Verification {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(serde::Serialize)]
        struct ErrorData<'a> {
            #[serde(rename = "errorMsg")]
            error_msg: &'a str,
        }

        let mut state = serializer.serialize_struct("Verification", 2)?;
        match self {
            Verification::Valid(claims) => {
                state.serialize_field("result", &true)?;
                state.serialize_field("data", claims)?;
            }
            Verification::Invalid { message, .. } => {
                state.serialize_field("result", &false)?;
                state.serialize_field("data", &ErrorData { error_msg: message })?;
            }
        }
        state.end()
    }
}
