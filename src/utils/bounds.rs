//! Bounds validation utilities
//!
//! Field size limits and overflow-checked time arithmetic.

use crate::error::{Error, Result};
use crate::limits::MAX_LEEWAY_SECONDS;

/// Add a lifetime to an issuance timestamp, rejecting overflow
pub(crate) fn expiry_from(now: i64, lifetime_seconds: i64) -> Result<i64> {
    now.checked_add(lifetime_seconds).ok_or_else(|| {
        Error::InvalidConfig("expiry overflows the timestamp range".into())
    })
}

/// Apply leeway to an expiry timestamp with overflow protection
pub(crate) fn apply_leeway(exp: i64, leeway_seconds: u64) -> i64 {
    exp.saturating_add(leeway_seconds.min(i64::MAX as u64) as i64)
}

/// Reject leeway values that would effectively disable expiry checks
pub(crate) fn validate_leeway(leeway_seconds: u64) -> Result<()> {
    if leeway_seconds > MAX_LEEWAY_SECONDS {
        return Err(Error::InvalidConfig(format!(
            "leeway too large: {leeway_seconds} seconds (maximum: {MAX_LEEWAY_SECONDS} seconds)"
        )));
    }
    Ok(())
}

/// Validate string field size
pub(crate) fn validate_field_size(field: &str, value: &str, max: usize) -> Result<()> {
    if value.len() > max {
        return Err(Error::MalformedToken(format!(
            "header field '{field}' too long: {} bytes (maximum: {max} bytes)",
            value.len()
        )));
    }
    Ok(())
}
