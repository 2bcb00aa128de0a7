use crate::error::{Error, Result};
use crate::keys::SecretKey;
use crate::token::Token;
use crate::utils::bounds::apply_leeway;
use crate::validator::ValidationContext;

/// A single validation rule applied to a parsed token
///
/// Constraints are independent of each other; the [`Validator`](crate::Validator)
/// decides their order and stops at the first failure.
pub trait Constraint: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Return `Ok(())` if the token satisfies this rule
    fn assert(&self, token: &Token, context: &ValidationContext) -> Result<()>;
}

impl<F> Constraint for F
where
    F: Fn(&Token, &ValidationContext) -> Result<()> + Send + Sync,
{
    fn name(&self) -> &'static str {
        "custom"
    }

    fn assert(&self, token: &Token, context: &ValidationContext) -> Result<()> {
        self(token, context)
    }
}

/// The signature was produced over the token's own header and payload
/// segments, with the context's algorithm and the given key
pub struct SignedWith<'k> {
    key: &'k SecretKey,
}

impl<'k> SignedWith<'k> {
    pub fn new(key: &'k SecretKey) -> Self {
        Self { key }
    }
}

impl Constraint for SignedWith<'_> {
    fn name(&self) -> &'static str {
        "signed_with"
    }

    fn assert(&self, token: &Token, context: &ValidationContext) -> Result<()> {
        let algorithm = context.expected_algorithm();

        // A header naming another algorithm was not signed the way we verify
        if token.header().algorithm_str() != algorithm.as_str() {
            tracing::debug!(
                expected = %algorithm,
                "token header algorithm does not match verifier"
            );
            return Err(Error::SignatureInvalid);
        }

        let message = token.signing_input().as_bytes();
        if algorithm.signer().verify(token.signature(), message, self.key) {
            Ok(())
        } else {
            Err(Error::SignatureInvalid)
        }
    }
}

/// `now` is strictly before `exp` (plus leeway); tokens without `exp` never expire
pub struct NotExpired;

impl Constraint for NotExpired {
    fn name(&self) -> &'static str {
        "not_expired"
    }

    fn assert(&self, token: &Token, context: &ValidationContext) -> Result<()> {
        let Some(exp) = token.claims().expiration() else {
            return Ok(());
        };

        let now = context.now();
        if now >= apply_leeway(exp, context.leeway_seconds()) {
            return Err(Error::TokenExpired {
                expired_at: exp,
                now,
            });
        }
        Ok(())
    }
}

/// `iss` equals the expected issuer exactly
pub struct IssuedBy;

impl Constraint for IssuedBy {
    fn name(&self) -> &'static str {
        "issued_by"
    }

    fn assert(&self, token: &Token, context: &ValidationContext) -> Result<()> {
        let expected = context.expected_issuer();
        match token.claims().issuer() {
            Some(iss) if iss == expected => Ok(()),
            found => Err(Error::IssuerMismatch {
                expected: expected.to_string(),
                found: found.map(str::to_string),
            }),
        }
    }
}

/// The expected audience is a member of `aud`
///
/// Passes when the context expects no particular audience.
pub struct PermittedFor;

impl Constraint for PermittedFor {
    fn name(&self) -> &'static str {
        "permitted_for"
    }

    fn assert(&self, token: &Token, context: &ValidationContext) -> Result<()> {
        let Some(expected) = context.expected_audience() else {
            return Ok(());
        };

        if token.claims().is_permitted_for(expected) {
            Ok(())
        } else {
            Err(Error::AudienceMismatch {
                expected: expected.to_string(),
                found: token
                    .claims()
                    .audience()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            })
        }
    }
}
