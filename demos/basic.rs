//! Issue a token, then verify it the way a receiving service would
//!
//! Run with `RUST_LOG=jwtseal=debug` to see issuance and rejection events.

use jwtseal::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jwtseal=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== jwtseal - Basic Example ===\n");

    // Issuing service
    let token = TokenBuilder::new(
        IssueConfig::new("svc-a", "your-256-bit-secret-key-here!")
            .audience("svc-b")
            .expires_in(3600)
            .claim("uid", "42")
            .with_issued_at(),
    )
    .build()?;
    println!("Token: {token}\n");

    // Receiving service
    let key = SecretKey::from("your-256-bit-secret-key-here!");
    let claims = Validator::new().validate_str(&token, &ValidationContext::new("svc-a", "svc-b"), &key)?;

    println!("=== Validated Claims ===");
    println!("Issuer: {:?}", claims.issuer());
    println!("Audience: {:?}", claims.audience());
    println!("Expires at: {:?}", claims.expiration());
    println!("Issued at: {:?}", claims.issued_at());
    println!("uid: {:?}\n", claims.get_str("uid"));

    // The wrong audience is a value, not a panic
    let outcome = verify(&token, &ValidationContext::new("svc-a", "svc-x"), &key);
    println!("Other audience: {}", serde_json::to_string(&outcome).unwrap_or_default());

    Ok(())
}
