//! Claim sets carried in the token payload
//!
//! A [`ClaimSet`] is an insertion-ordered JSON object. Registered claims
//! (`iss`, `aud`, `exp`, ...) are type-checked when a payload is decoded, so
//! every accessor below can trust the shape of what it reads.

mod constraint;

pub use constraint::{Constraint, IssuedBy, NotExpired, PermittedFor, SignedWith};

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// Claim names defined by RFC 7519 Section 4.1
pub const REGISTERED_CLAIMS: [&str; 7] = ["iss", "sub", "aud", "exp", "nbf", "iat", "jti"];

const STRING_CLAIMS: [&str; 3] = ["iss", "sub", "jti"];
const TIMESTAMP_CLAIMS: [&str; 3] = ["exp", "nbf", "iat"];

/// Whether `name` is one of the registered claim names
pub fn is_registered(name: &str) -> bool {
    REGISTERED_CLAIMS.contains(&name)
}

/// Audience written on issuance
///
/// A single audience is encoded as a JSON string, several as an array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

impl Audience {
    /// Add another audience, widening a single value into a set
    pub fn push(self, audience: impl Into<String>) -> Self {
        match self {
            Audience::One(first) => Audience::Many(vec![first, audience.into()]),
            Audience::Many(mut all) => {
                all.push(audience.into());
                Audience::Many(all)
            }
        }
    }

    pub fn contains(&self, audience: &str) -> bool {
        match self {
            Audience::One(aud) => aud == audience,
            Audience::Many(all) => all.iter().any(|aud| aud == audience),
        }
    }
}

impl From<&str> for Audience {
    fn from(audience: &str) -> Self {
        Audience::One(audience.to_string())
    }
}

impl From<String> for Audience {
    fn from(audience: String) -> Self {
        Audience::One(audience)
    }
}

impl From<Vec<String>> for Audience {
    fn from(mut all: Vec<String>) -> Self {
        if all.len() == 1 {
            Audience::One(all.remove(0))
        } else {
            Audience::Many(all)
        }
    }
}

impl From<Audience> for Value {
    fn from(audience: Audience) -> Self {
        match audience {
            Audience::One(aud) => Value::String(aud),
            Audience::Many(all) => Value::Array(all.into_iter().map(Value::String).collect()),
        }
    }
}

/// Mapping from claim name to value, in encoding order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ClaimSet {
    claims: Map<String, Value>,
}

impl ClaimSet {
    /// Create an empty claim set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a claim set from a decoded JSON object, checking registered claim types
    pub(crate) fn from_object(claims: Map<String, Value>) -> Result<Self> {
        for name in STRING_CLAIMS {
            if let Some(value) = claims.get(name) {
                if !value.is_string() {
                    return Err(Error::MalformedClaims(format!(
                        "claim '{name}' must be a string"
                    )));
                }
            }
        }

        if let Some(aud) = claims.get("aud") {
            let valid = match aud {
                Value::String(_) => true,
                Value::Array(items) => items.iter().all(Value::is_string),
                _ => false,
            };
            if !valid {
                return Err(Error::MalformedClaims(
                    "claim 'aud' must be a string or an array of strings".into(),
                ));
            }
        }

        for name in TIMESTAMP_CLAIMS {
            if let Some(value) = claims.get(name) {
                if timestamp(value, f64::trunc).is_none() {
                    return Err(Error::MalformedClaims(format!(
                        "claim '{name}' must be a numeric timestamp"
                    )));
                }
            }
        }

        Ok(Self { claims })
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.claims.insert(name.into(), value.into());
    }

    /// Issuer (iss)
    pub fn issuer(&self) -> Option<&str> {
        self.get_str("iss")
    }

    /// Subject (sub)
    pub fn subject(&self) -> Option<&str> {
        self.get_str("sub")
    }

    /// Audience (aud) as a set; a single string is a one-element set
    pub fn audience(&self) -> Vec<&str> {
        match self.claims.get("aud") {
            Some(Value::String(aud)) => vec![aud.as_str()],
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Whether `audience` is a member of the token's audience set
    pub fn is_permitted_for(&self, audience: &str) -> bool {
        self.audience().contains(&audience)
    }

    /// Expiration time (exp) as Unix timestamp; a fractional exp rounds up
    pub fn expiration(&self) -> Option<i64> {
        self.claims.get("exp").and_then(|v| timestamp(v, f64::ceil))
    }

    /// Not-before time (nbf) as Unix timestamp
    pub fn not_before(&self) -> Option<i64> {
        self.claims.get("nbf").and_then(|v| timestamp(v, f64::trunc))
    }

    /// Issued-at time (iat) as Unix timestamp
    pub fn issued_at(&self) -> Option<i64> {
        self.claims.get("iat").and_then(|v| timestamp(v, f64::trunc))
    }

    /// JWT ID (jti)
    pub fn jwt_id(&self) -> Option<&str> {
        self.get_str("jti")
    }

    /// Raw value of any claim
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    /// String value of any claim
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.claims.get(name).and_then(Value::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.claims.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// All claims in encoding order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.claims.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Claims that are not registered claims
    pub fn custom(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.iter().filter(|(name, _)| !is_registered(name))
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.claims
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.claims
    }

    /// Serialize to compact JSON, preserving claim order
    pub fn to_json(&self) -> String {
        Value::Object(self.claims.clone()).to_string()
    }
}

/// Read a numeric timestamp, rounding fractional seconds with `round`
fn timestamp(value: &Value, round: fn(f64) -> f64) -> Option<i64> {
    if let Some(ts) = value.as_i64() {
        return Some(ts);
    }
    if value.is_u64() {
        // Larger than i64::MAX
        return Some(i64::MAX);
    }
    value
        .as_f64()
        .filter(|f| f.is_finite())
        .map(|f| round(f).clamp(i64::MIN as f64, i64::MAX as f64) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_accessors() {
        let claims = ClaimSet::from_object(object(json!({
            "iss": "svc-a",
            "sub": "user123",
            "aud": "svc-b",
            "exp": 1_700_003_600,
            "iat": 1_700_000_000,
            "jti": "id-1",
            "uid": "42"
        })))
        .unwrap();

        assert_eq!(claims.issuer(), Some("svc-a"));
        assert_eq!(claims.subject(), Some("user123"));
        assert_eq!(claims.audience(), vec!["svc-b"]);
        assert_eq!(claims.expiration(), Some(1_700_003_600));
        assert_eq!(claims.issued_at(), Some(1_700_000_000));
        assert_eq!(claims.not_before(), None);
        assert_eq!(claims.jwt_id(), Some("id-1"));
        assert_eq!(claims.get_str("uid"), Some("42"));
        assert_eq!(claims.len(), 7);
    }

    #[test]
    fn test_audience_set() {
        let claims =
            ClaimSet::from_object(object(json!({"aud": ["svc-b", "svc-c"]}))).unwrap();
        assert_eq!(claims.audience(), vec!["svc-b", "svc-c"]);
        assert!(claims.is_permitted_for("svc-c"));
        assert!(!claims.is_permitted_for("svc-d"));

        let none = ClaimSet::new();
        assert!(none.audience().is_empty());
        assert!(!none.is_permitted_for(""));
    }

    #[test]
    fn test_order_preserved() {
        let claims = ClaimSet::from_object(object(json!({
            "iss": "a", "exp": 10, "zeta": "z", "alpha": "x"
        })))
        .unwrap();
        let names: Vec<&str> = claims.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["iss", "exp", "zeta", "alpha"]);
        assert_eq!(claims.to_json(), r#"{"iss":"a","exp":10,"zeta":"z","alpha":"x"}"#);
    }

    #[test]
    fn test_custom_excludes_registered() {
        let claims =
            ClaimSet::from_object(object(json!({"iss": "a", "uid": "42", "exp": 5}))).unwrap();
        let custom: Vec<&str> = claims.custom().map(|(k, _)| k).collect();
        assert_eq!(custom, vec!["uid"]);
    }

    #[test]
    fn test_fractional_timestamps() {
        let claims = ClaimSet::from_object(object(json!({
            "exp": 1_700_000_000.25,
            "nbf": 1_700_000_000.75,
            "iat": 1_700_000_000.75
        })))
        .unwrap();
        assert_eq!(claims.expiration(), Some(1_700_000_001));
        assert_eq!(claims.not_before(), Some(1_700_000_000));
        assert_eq!(claims.issued_at(), Some(1_700_000_000));
    }

    #[test]
    fn test_far_timestamps_accepted() {
        let claims = ClaimSet::from_object(object(json!({
            "exp": 5_000_000_000_i64,
            "nbf": -1,
            "iat": 0
        })))
        .unwrap();
        assert_eq!(claims.expiration(), Some(5_000_000_000));
        assert_eq!(claims.not_before(), Some(-1));
        assert_eq!(claims.issued_at(), Some(0));
    }

    #[test]
    fn test_rejects_wrong_types() {
        for payload in [
            json!({"iss": 5}),
            json!({"sub": true}),
            json!({"jti": ["a"]}),
            json!({"aud": 7}),
            json!({"aud": ["ok", 7]}),
            json!({"exp": "1700000000"}),
            json!({"iat": null}),
            json!({"nbf": {"at": 1}}),
        ] {
            assert!(
                matches!(
                    ClaimSet::from_object(object(payload.clone())),
                    Err(Error::MalformedClaims(_))
                ),
                "accepted {payload}"
            );
        }
    }

    #[test]
    fn test_audience_encoding() {
        let one = Audience::from("svc-b");
        assert_eq!(Value::from(one.clone()), json!("svc-b"));
        assert!(one.contains("svc-b"));

        let many = one.push("svc-c");
        assert!(many.contains("svc-c"));
        assert_eq!(Value::from(many), json!(["svc-b", "svc-c"]));

        assert_eq!(
            Audience::from(vec!["only".to_string()]),
            Audience::One("only".into())
        );
    }

    #[test]
    fn test_registered_names() {
        assert!(is_registered("exp"));
        assert!(is_registered("aud"));
        assert!(!is_registered("uid"));
    }
}
