use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use super::test_helpers::{token_expiring_at_ms, token_with_payload};
use super::*;

const NOW_MS: i64 = 1_700_000_000_000;

// =============================================================
// decode_claims
// =============================================================

#[test]
fn decode_reads_exp() {
    let token = token_with_payload(&serde_json::json!({ "sub": "ada@example.com", "exp": 1_700_000_000 }));
    let claims = decode_claims(&token).unwrap();
    assert_eq!(claims.exp, Some(serde_json::json!(1_700_000_000)));
}

#[test]
fn decode_ignores_other_claims_of_any_type() {
    let token = token_with_payload(&serde_json::json!({
        "sub": 42,
        "roles": ["user"],
        "iat": "yesterday",
        "exp": 1_800_000_000
    }));
    let claims = decode_claims(&token).unwrap();
    assert!(!claims.expired_at(NOW_MS));
}

#[test]
fn decode_keeps_null_exp_distinct_from_absent() {
    let null = token_with_payload(&serde_json::json!({ "exp": null }));
    assert_eq!(decode_claims(&null).unwrap().exp, Some(serde_json::Value::Null));
    let absent = token_with_payload(&serde_json::json!({ "sub": "x" }));
    assert_eq!(decode_claims(&absent).unwrap().exp, None);
}

#[test]
fn decode_accepts_padded_payload() {
    let token = token_with_payload(&serde_json::json!({ "exp": 1 }));
    let mut parts: Vec<String> = token.split('.').map(str::to_owned).collect();
    parts[1].push_str("==");
    let claims = decode_claims(&parts.join(".")).unwrap();
    assert_eq!(claims.exp, Some(serde_json::json!(1)));
}

#[test]
fn decode_without_exp_is_ok() {
    let token = token_with_payload(&serde_json::json!({ "sub": "x" }));
    assert_eq!(decode_claims(&token).unwrap().exp, None);
}

#[test]
fn decode_single_segment_is_missing_payload() {
    assert!(matches!(decode_claims("opaque"), Err(TokenError::MissingPayload)));
}

#[test]
fn decode_empty_payload_is_missing_payload() {
    assert!(matches!(decode_claims("a..c"), Err(TokenError::MissingPayload)));
}

#[test]
fn decode_non_base64_payload_errors() {
    assert!(matches!(decode_claims("a.!!!.c"), Err(TokenError::Base64(_))));
}

#[test]
fn decode_non_json_payload_errors() {
    let token = format!("a.{}.c", URL_SAFE_NO_PAD.encode("not json"));
    assert!(matches!(decode_claims(&token), Err(TokenError::Json(_))));
}

#[test]
fn decode_placeholder_token_errors() {
    assert!(decode_claims("abc.def.ghi").is_err());
}

#[test]
fn decode_json_array_payload_errors() {
    let token = token_with_payload(&serde_json::json!([1, 2, 3]));
    assert!(decode_claims(&token).is_err());
}

// =============================================================
// Claims::expired_at
// =============================================================

#[test]
fn expired_when_exp_before_now() {
    let claims = decode_claims(&token_expiring_at_ms(NOW_MS - 1000)).unwrap();
    assert!(claims.expired_at(NOW_MS));
}

#[test]
fn not_expired_when_exp_after_now() {
    let claims = decode_claims(&token_expiring_at_ms(NOW_MS + 3_600_000)).unwrap();
    assert!(!claims.expired_at(NOW_MS));
}

#[test]
fn not_expired_at_exact_expiry() {
    let claims = Claims { exp: Some(serde_json::json!(1_700_000_000)) };
    assert!(!claims.expired_at(NOW_MS));
}

#[test]
fn missing_exp_never_expires() {
    let claims = Claims { exp: None };
    assert!(!claims.expired_at(i64::MAX));
}

#[test]
fn null_exp_has_expired() {
    let claims = Claims { exp: Some(serde_json::Value::Null) };
    assert!(claims.expired_at(NOW_MS));
}

#[test]
fn numeric_string_exp_is_read_as_seconds() {
    let past = Claims { exp: Some(serde_json::json!("1699999999")) };
    let future = Claims { exp: Some(serde_json::json!(" 1800000000 ")) };
    let blank = Claims { exp: Some(serde_json::json!("")) };
    assert!(past.expired_at(NOW_MS));
    assert!(!future.expired_at(NOW_MS));
    assert!(blank.expired_at(NOW_MS));
}

#[test]
fn non_numeric_exp_never_expires() {
    let word = Claims { exp: Some(serde_json::json!("soon")) };
    let object = Claims { exp: Some(serde_json::json!({ "at": 1 })) };
    assert!(!word.expired_at(NOW_MS));
    assert!(!object.expired_at(NOW_MS));
}
