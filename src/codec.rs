//! Compact serialization codec
//!
//! Encodes and decodes the three dot-separated Base64URL segments of a JWT:
//!
//! ```text
//! base64url(header_json) "." base64url(payload_json) "." base64url(signature)
//! ```
//!
//! Structural problems (segment count, alphabet, header JSON, size limits)
//! are [`Error::MalformedToken`]; a payload that is not a well-typed JSON
//! object is [`Error::MalformedClaims`].

use crate::claims::ClaimSet;
use crate::error::{Error, Result};
use crate::limits::{
    MAX_ALG_LENGTH, MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE,
    MAX_DECODED_SIGNATURE_SIZE, MAX_TOKEN_LENGTH,
};
use crate::token::{Token, TokenHeader};
use crate::utils::base64url;
use crate::utils::bounds::validate_field_size;
use serde::Serialize;
use serde_json::Value;

/// Encode bytes as an unpadded Base64URL segment
pub fn encode_segment(bytes: &[u8]) -> String {
    base64url::encode_bytes(bytes)
}

/// Decode an unpadded Base64URL segment
pub fn decode_segment(segment: &str) -> Result<Vec<u8>> {
    base64url::decode_bytes(segment, MAX_TOKEN_LENGTH)
}

/// Serialize a value to compact JSON and encode it as a segment
pub fn encode_json_segment<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_vec(value)
        .map_err(|e| Error::InvalidConfig(format!("failed to serialize segment: {e}")))?;
    Ok(encode_segment(&json))
}

/// Parse a compact-serialized token
///
/// Checks structure only. The returned [`Token`] is not authenticated.
pub fn parse(token: &str) -> Result<Token> {
    if token.len() > MAX_TOKEN_LENGTH {
        return Err(Error::MalformedToken(format!(
            "token too large: {} bytes (maximum: {MAX_TOKEN_LENGTH} bytes)",
            token.len()
        )));
    }

    let mut parts = token.split('.');
    let (Some(header_b64), Some(payload_b64), Some(signature_b64), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(Error::MalformedToken(
            "expected three segments separated by '.'".into(),
        ));
    };

    let header = decode_header(header_b64)?;
    let claims = decode_claims(payload_b64)?;
    let signature = base64url::decode_bytes(signature_b64, MAX_DECODED_SIGNATURE_SIZE)?;

    Ok(Token::from_parts(
        header,
        claims,
        signature,
        token.to_string(),
        header_b64.len() + 1 + payload_b64.len(),
    ))
}

fn decode_header(segment: &str) -> Result<TokenHeader> {
    let bytes = base64url::decode_bytes(segment, MAX_DECODED_HEADER_SIZE)?;

    let value: Value = serde_json::from_slice(&bytes)
        .map_err(|e| Error::MalformedToken(format!("Failed to parse header: {e}")))?;
    if !value.is_object() {
        return Err(Error::MalformedToken("header is not a JSON object".into()));
    }

    let header: TokenHeader = serde_json::from_value(value)
        .map_err(|e| Error::MalformedToken(format!("Invalid header: {e}")))?;
    validate_field_size("alg", &header.algorithm, MAX_ALG_LENGTH)?;

    Ok(header)
}

fn decode_claims(segment: &str) -> Result<ClaimSet> {
    let bytes = base64url::decode_bytes(segment, MAX_DECODED_PAYLOAD_SIZE)?;

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(claims)) => ClaimSet::from_object(claims),
        Ok(_) => Err(Error::MalformedClaims(
            "payload is not a JSON object".into(),
        )),
        Err(e) => Err(Error::MalformedClaims(format!(
            "Failed to parse payload: {e}"
        ))),
    }
}
