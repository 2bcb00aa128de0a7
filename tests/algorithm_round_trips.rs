//! Per-algorithm round-trip tests
//!
//! Each supported algorithm must:
//! 1. Issue a token that verifies under the same algorithm and key
//! 2. Verify tokens signed independently with the `hmac` crate
//! 3. Reject tokens produced under any other algorithm or key

use jwtseal::*;

const T0: i64 = 1_700_000_000;

fn issue(algorithm: AlgorithmId, key: &str) -> String {
    TokenBuilder::new(
        IssueConfig::new("https://example.com", key)
            .audience("test-app")
            .expires_in(3600)
            .claim("role", "admin")
            .with_issued_at()
            .algorithm(algorithm),
    )
    .with_clock(FixedClock(T0))
    .build()
    .expect("issue failed")
}

fn context(algorithm: AlgorithmId) -> ValidationContext {
    ValidationContext::new("https://example.com", "test-app")
        .at(T0 + 60)
        .algorithm(algorithm)
}

// ============================================================================
// Issue -> Verify
// ============================================================================

mod round_trips {
    use super::*;

    fn round_trip(algorithm: AlgorithmId) {
        let token = issue(algorithm, "test-secret-key");
        let claims = Validator::new()
            .validate_str(&token, &context(algorithm), &SecretKey::from("test-secret-key"))
            .expect("validation failed");

        assert_eq!(claims.issuer(), Some("https://example.com"));
        assert_eq!(claims.audience(), vec!["test-app"]);
        assert_eq!(claims.expiration(), Some(T0 + 3600));
        assert_eq!(claims.issued_at(), Some(T0));
        assert_eq!(claims.get_str("role"), Some("admin"));
    }

    #[test]
    fn round_trip_hs256() {
        round_trip(AlgorithmId::HS256);
    }

    #[test]
    fn round_trip_hs384() {
        round_trip(AlgorithmId::HS384);
    }

    #[test]
    fn round_trip_hs512() {
        round_trip(AlgorithmId::HS512);
    }
}

// ============================================================================
// Independently signed tokens
// ============================================================================

mod external_signatures {
    use super::*;
    use hmac::{Hmac, Mac};
    use jwtseal::utils::base64url;
    use sha2::{Sha256, Sha384, Sha512};

    fn sign_externally(alg: &str, secret: &[u8]) -> String {
        let header = format!(r#"{{"alg":"{alg}","typ":"JWT"}}"#);
        let payload = format!(
            r#"{{"iss":"https://example.com","aud":["other","test-app"],"exp":{}}}"#,
            T0 + 3600
        );
        let signing_input = format!(
            "{}.{}",
            base64url::encode(&header),
            base64url::encode(&payload)
        );

        let signature = match alg {
            "HS256" => {
                let mut mac = Hmac::<Sha256>::new_from_slice(secret).unwrap();
                mac.update(signing_input.as_bytes());
                mac.finalize().into_bytes().to_vec()
            }
            "HS384" => {
                let mut mac = Hmac::<Sha384>::new_from_slice(secret).unwrap();
                mac.update(signing_input.as_bytes());
                mac.finalize().into_bytes().to_vec()
            }
            "HS512" => {
                let mut mac = Hmac::<Sha512>::new_from_slice(secret).unwrap();
                mac.update(signing_input.as_bytes());
                mac.finalize().into_bytes().to_vec()
            }
            _ => panic!("Unsupported algorithm: {alg}"),
        };

        format!("{signing_input}.{}", base64url::encode_bytes(&signature))
    }

    #[test]
    fn verifies_hmac_crate_signatures() {
        for algorithm in AlgorithmId::ALL {
            let token = sign_externally(algorithm.as_str(), b"external-secret");
            let claims = Validator::new()
                .validate_str(&token, &context(algorithm), &SecretKey::from(b"external-secret"))
                .unwrap_or_else(|e| panic!("{algorithm} rejected: {e}"));
            assert!(claims.is_permitted_for("test-app"));
        }
    }

    #[test]
    fn issued_signature_matches_hmac_crate() {
        let token = issue(AlgorithmId::HS256, "secret");
        let parsed = Token::parse(&token).unwrap();

        let mut mac = Hmac::<Sha256>::new_from_slice(b"secret").unwrap();
        mac.update(parsed.signing_input().as_bytes());
        assert_eq!(parsed.signature(), mac.finalize().into_bytes().as_slice());
    }
}

// ============================================================================
// Cross-algorithm and cross-key rejection
// ============================================================================

mod rejection {
    use super::*;

    #[test]
    fn cross_algorithm_verification_fails() {
        let key = SecretKey::from("shared-secret");
        for issued_with in AlgorithmId::ALL {
            let token = issue(issued_with, "shared-secret");
            for verified_with in AlgorithmId::ALL {
                let result = Validator::new().validate_str(&token, &context(verified_with), &key);
                if issued_with == verified_with {
                    assert!(result.is_ok(), "{issued_with} failed to verify");
                } else {
                    assert_eq!(
                        result,
                        Err(Error::SignatureInvalid),
                        "{issued_with} verified as {verified_with}"
                    );
                }
            }
        }
    }

    #[test]
    fn wrong_key_fails() {
        for algorithm in AlgorithmId::ALL {
            let token = issue(algorithm, "right-key");
            let result = Validator::new().validate_str(
                &token,
                &context(algorithm),
                &SecretKey::from("wrong-key"),
            );
            assert_eq!(result, Err(Error::SignatureInvalid));
        }
    }

    #[test]
    fn signature_length_per_algorithm() {
        for algorithm in AlgorithmId::ALL {
            let token = Token::parse(&issue(algorithm, "k")).unwrap();
            assert_eq!(token.signature().len(), algorithm.output_len());
        }
    }
}
