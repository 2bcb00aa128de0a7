//! Size limit constants for input validation

/// Maximum length for a JWT token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

/// Maximum size for decoded JWT header JSON (8KB)
pub(crate) const MAX_DECODED_HEADER_SIZE: usize = 8 * 1024;

/// Maximum size for decoded JWT payload JSON (48KB)
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 48 * 1024;

/// Maximum size for decoded signature bytes
/// HS512 produces 64 bytes; anything far beyond that is not an HMAC tag
pub(crate) const MAX_DECODED_SIGNATURE_SIZE: usize = 512;

/// Maximum length for algorithm (alg) field in JWT header (16 bytes)
pub(crate) const MAX_ALG_LENGTH: usize = 16;

// ============================================================================
// Validation bounds
// ============================================================================

/// Maximum expiry leeway (300 seconds = 5 minutes)
/// Prevents leeway from effectively disabling expiration checks
pub const MAX_LEEWAY_SECONDS: u64 = 300;

/// Default token lifetime in seconds
pub const DEFAULT_EXPIRY_SECONDS: i64 = 7200;
