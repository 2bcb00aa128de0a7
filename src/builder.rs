//! Token issuance
//!
//! [`IssueConfig`] is an immutable description of one token; [`TokenBuilder`]
//! turns it into the final compact string exactly once. Configuration errors
//! are reported before anything is encoded or signed.
//!
//! ```ignore
//! let token = TokenBuilder::new(
//!     IssueConfig::new("svc-a", "secret")
//!         .audience("svc-b")
//!         .expires_in(3600)
//!         .claim("uid", "42"),
//! )
//! .build()?;
//! ```

use crate::algorithm::{AlgorithmId, AlgorithmSelection};
use crate::claims::{Audience, ClaimSet, is_registered};
use crate::clock::{Clock, SystemClock};
use crate::codec;
use crate::error::{Error, Result};
use crate::keys::SecretKey;
use crate::limits::DEFAULT_EXPIRY_SECONDS;
use crate::token::TokenHeader;
use crate::utils::bounds::expiry_from;
use serde_json::{Map, Value};

/// Everything needed to issue one token
#[derive(Debug, Clone)]
pub struct IssueConfig {
    issuer: String,
    audience: Option<Audience>,
    expires_in: i64,
    claims: Map<String, Value>,
    algorithm: AlgorithmId,
    key: SecretKey,
    issued_at: bool,
    jwt_id: Option<String>,
}

impl IssueConfig {
    /// Tokens from `issuer`, signed with `key`, HS256, valid for 7200 seconds
    pub fn new(issuer: impl Into<String>, key: impl Into<SecretKey>) -> Self {
        Self {
            issuer: issuer.into(),
            audience: None,
            expires_in: DEFAULT_EXPIRY_SECONDS,
            claims: Map::new(),
            algorithm: AlgorithmId::default(),
            key: key.into(),
            issued_at: false,
            jwt_id: None,
        }
    }

    /// Add an intended audience; repeat for several. Empty strings are ignored.
    pub fn audience(mut self, audience: impl Into<String>) -> Self {
        let audience = audience.into();
        if audience.is_empty() {
            return self;
        }
        self.audience = Some(match self.audience {
            None => Audience::One(audience),
            Some(existing) => existing.push(audience),
        });
        self
    }

    /// Lifetime in seconds from issuance
    pub fn expires_in(mut self, seconds: i64) -> Self {
        self.expires_in = seconds;
        self
    }

    /// Add a custom string claim; later values replace earlier ones in place
    pub fn claim(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.claims.insert(name.into(), Value::String(value.into()));
        self
    }

    pub fn algorithm(mut self, algorithm: AlgorithmId) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Select the algorithm by identifier string
    pub fn algorithm_name(mut self, name: &str, selection: AlgorithmSelection) -> Result<Self> {
        self.algorithm = selection.resolve(name)?;
        Ok(self)
    }

    /// Emit an `iat` claim
    pub fn with_issued_at(mut self) -> Self {
        self.issued_at = true;
        self
    }

    /// Emit a `jti` claim
    pub fn jwt_id(mut self, id: impl Into<String>) -> Self {
        self.jwt_id = Some(id.into());
        self
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn selected_algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    fn check(&self) -> Result<()> {
        self.key.ensure_usable()?;

        if self.expires_in < 0 {
            return Err(Error::InvalidConfig(format!(
                "expiry must not be negative: {} seconds",
                self.expires_in
            )));
        }

        if let Some(name) = self.claims.keys().find(|name| is_registered(name)) {
            return Err(Error::InvalidConfig(format!(
                "custom claim '{name}' collides with a registered claim"
            )));
        }

        Ok(())
    }

    fn claim_set(&self, now: i64) -> Result<ClaimSet> {
        let exp = expiry_from(now, self.expires_in)?;

        let mut claims = ClaimSet::new();
        claims.insert("iss", self.issuer.as_str());
        if let Some(audience) = &self.audience {
            claims.insert("aud", audience.clone());
        }
        claims.insert("exp", exp);
        if self.issued_at {
            claims.insert("iat", now);
        }
        if let Some(id) = &self.jwt_id {
            claims.insert("jti", id.as_str());
        }
        for (name, value) in &self.claims {
            claims.insert(name.as_str(), value.clone());
        }

        Ok(claims)
    }
}

/// Produces the encoded token for one [`IssueConfig`]
///
/// `build` consumes the builder, so a builder never carries state into a
/// second token.
#[derive(Debug)]
pub struct TokenBuilder<C: Clock = SystemClock> {
    config: IssueConfig,
    clock: C,
}

impl TokenBuilder {
    pub fn new(config: IssueConfig) -> Self {
        Self {
            config,
            clock: SystemClock,
        }
    }
}

impl<C: Clock> TokenBuilder<C> {
    /// Take the issuance time from `clock`
    pub fn with_clock<D: Clock>(self, clock: D) -> TokenBuilder<D> {
        TokenBuilder {
            config: self.config,
            clock,
        }
    }

    /// Encode and sign: `b64(header).b64(payload).b64(signature)`
    pub fn build(self) -> Result<String> {
        let config = self.config;
        config.check()?;

        let now = self.clock.now();
        let claims = config.claim_set(now)?;

        let header = codec::encode_json_segment(&TokenHeader::new(config.algorithm))?;
        let payload = codec::encode_json_segment(&claims)?;
        let signing_input = format!("{header}.{payload}");

        let signature = config
            .algorithm
            .signer()
            .sign(signing_input.as_bytes(), &config.key)?;

        tracing::debug!(
            issuer = %config.issuer,
            algorithm = %config.algorithm,
            exp = ?claims.expiration(),
            "token issued"
        );

        Ok(format!(
            "{signing_input}.{}",
            codec::encode_segment(&signature)
        ))
    }
}

/// Start issuing a token with the system clock
pub fn new_token(config: IssueConfig) -> TokenBuilder {
    TokenBuilder::new(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::codec::parse;

    const T0: i64 = 1_700_000_000;

    fn build_at(config: IssueConfig, now: i64) -> Result<String> {
        TokenBuilder::new(config).with_clock(FixedClock(now)).build()
    }

    #[test]
    fn test_deterministic_vector() {
        let token = build_at(
            IssueConfig::new("svc-a", "secret")
                .audience("svc-b")
                .expires_in(3600)
                .claim("uid", "42"),
            T0,
        )
        .unwrap();

        assert_eq!(
            token,
            "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9\
             .eyJpc3MiOiJzdmMtYSIsImF1ZCI6InN2Yy1iIiwiZXhwIjoxNzAwMDAzNjAwLCJ1aWQiOiI0MiJ9\
             .H0ZcZp4MU5jCtZXuNy8Hrfod0GuSyFNQhN4Uy_1_Z_Y"
        );
    }

    #[test]
    fn test_payload_order() {
        let token = build_at(
            IssueConfig::new("svc-a", "secret")
                .claim("zeta", "1")
                .claim("alpha", "2")
                .jwt_id("id-1")
                .with_issued_at()
                .audience("svc-b")
                .audience("svc-c"),
            T0,
        )
        .unwrap();

        let claims = parse(&token).unwrap().into_claims();
        let names: Vec<&str> = claims.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["iss", "aud", "exp", "iat", "jti", "zeta", "alpha"]);
        assert_eq!(claims.audience(), vec!["svc-b", "svc-c"]);
        assert_eq!(claims.expiration(), Some(T0 + DEFAULT_EXPIRY_SECONDS));
        assert_eq!(claims.issued_at(), Some(T0));
    }

    #[test]
    fn test_header() {
        for algorithm in AlgorithmId::ALL {
            let token =
                build_at(IssueConfig::new("svc-a", "secret").algorithm(algorithm), T0).unwrap();
            let parsed = parse(&token).unwrap();
            assert_eq!(parsed.header().algorithm_str(), algorithm.as_str());
            assert_eq!(parsed.header().token_type.as_deref(), Some("JWT"));
            assert_eq!(parsed.signature().len(), algorithm.output_len());
        }
    }

    #[test]
    fn test_repeated_claim_keeps_position() {
        let token = build_at(
            IssueConfig::new("svc-a", "secret")
                .claim("a", "1")
                .claim("b", "2")
                .claim("a", "3"),
            T0,
        )
        .unwrap();
        let claims = parse(&token).unwrap().into_claims();
        assert_eq!(
            claims.to_json(),
            format!(r#"{{"iss":"svc-a","exp":{},"a":"3","b":"2"}}"#, T0 + 7200)
        );
    }

    #[test]
    fn test_invalid_config() {
        let cases = [
            IssueConfig::new("svc-a", ""),
            IssueConfig::new("svc-a", "secret").expires_in(-1),
            IssueConfig::new("svc-a", "secret").claim("exp", "never"),
            IssueConfig::new("svc-a", "secret").claim("aud", "svc-x"),
        ];
        for config in cases {
            assert!(
                matches!(build_at(config.clone(), T0), Err(Error::InvalidConfig(_))),
                "accepted {config:?}"
            );
        }
    }

    #[test]
    fn test_expiry_overflow() {
        let config = IssueConfig::new("svc-a", "secret").expires_in(i64::MAX);
        assert!(matches!(build_at(config, T0), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_long_lifetime_accepted() {
        let token = build_at(
            IssueConfig::new("svc-a", "secret")
                .expires_in(2_500_000_000)
                .with_issued_at(),
            T0,
        )
        .unwrap();
        let claims = parse(&token).unwrap().into_claims();
        assert_eq!(claims.expiration(), Some(4_200_000_000));
        assert_eq!(claims.issued_at(), Some(T0));
    }

    #[test]
    fn test_empty_audience_ignored() {
        let token = build_at(IssueConfig::new("svc-a", "secret").audience(""), T0).unwrap();
        let claims = parse(&token).unwrap().into_claims();
        assert!(claims.get("aud").is_none());

        let token = build_at(
            IssueConfig::new("svc-a", "secret").audience("").audience("svc-b"),
            T0,
        )
        .unwrap();
        let claims = parse(&token).unwrap().into_claims();
        assert_eq!(claims.get_str("aud"), Some("svc-b"));
    }

    #[test]
    fn test_zero_expiry() {
        let token = build_at(IssueConfig::new("svc-a", "secret").expires_in(0), T0).unwrap();
        assert_eq!(parse(&token).unwrap().claims().expiration(), Some(T0));
    }

    #[test]
    fn test_algorithm_name() {
        let strict = IssueConfig::new("svc-a", "secret")
            .algorithm_name("HS384", AlgorithmSelection::Strict)
            .unwrap();
        assert_eq!(strict.selected_algorithm(), AlgorithmId::HS384);

        assert!(matches!(
            IssueConfig::new("svc-a", "secret").algorithm_name("HS999", AlgorithmSelection::Strict),
            Err(Error::InvalidConfig(_))
        ));

        let lenient = IssueConfig::new("svc-a", "secret")
            .algorithm_name("HS999", AlgorithmSelection::Lenient)
            .unwrap();
        assert_eq!(lenient.selected_algorithm(), AlgorithmId::HS256);
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = IssueConfig::new("svc-a", "super-secret-value");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret-value"));
        assert_eq!(config.issuer(), "svc-a");
    }

    #[test]
    fn test_new_token_uses_system_clock() {
        let token = new_token(IssueConfig::new("svc-a", "secret")).build().unwrap();
        let exp = parse(&token).unwrap().claims().expiration().unwrap();
        let now = SystemClock.now();
        assert!(exp > now && exp <= now + DEFAULT_EXPIRY_SECONDS);
    }
}
