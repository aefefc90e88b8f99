//! # Session Token Decoding
//!
//! Reads the claims of a backend-issued JWT.
//!
//! The client holds no signing key, so the signature is not verified here;
//! the backend verifies it on every request. What the client does check is
//! that the token is well formed, that the claims describe an identity, and
//! that it has not expired.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use super::errors::DecodeFailure;
use super::identity::{Identity, TokenClaims};

fn claims_validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    // `exp` is checked when present but not required
    validation.required_spec_claims.clear();
    validation.validate_exp = true;
    validation.validate_aud = false;
    validation.leeway = 0;
    validation
}

/// Decode the claims of a session token into an [`Identity`].
pub fn decode(token: &str) -> Result<Identity, DecodeFailure> {
    let token = token.trim();
    if token.is_empty() {
        return Err(DecodeFailure::Malformed);
    }

    let data = jsonwebtoken::decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(&[]),
        &claims_validation(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => DecodeFailure::Expired,
        ErrorKind::Json(inner) => DecodeFailure::InvalidClaims(inner.to_string()),
        _ => DecodeFailure::Malformed,
    })?;

    Ok(Identity::from(data.claims))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::identity::Role;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::{json, Value};

    fn mint(claims: Value) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"backend-only-secret"),
        )
        .unwrap()
    }

    #[test]
    fn test_decode_user_token() {
        let token = mint(json!({"userId": "u1", "role": "user", "companyId": "c123"}));
        let identity = decode(&token).unwrap();

        assert_eq!(identity.role, Role::User);
        assert_eq!(identity.user_id.as_deref(), Some("u1"));
        assert_eq!(identity.company_id.as_deref(), Some("c123"));
    }

    #[test]
    fn test_decode_admin_token_without_company() {
        let token = mint(json!({"userId": "a1", "role": "admin"}));
        let identity = decode(&token).unwrap();

        assert!(identity.is_admin());
        assert!(identity.company_id.is_none());
    }

    #[test]
    fn test_decode_token_with_sub_and_user_id() {
        let token = mint(json!({"sub": "u1", "userId": "u1", "role": "user", "companyId": "c1"}));
        let identity = decode(&token).unwrap();

        assert_eq!(identity.user_id.as_deref(), Some("u1"));
        assert_eq!(identity.company_id.as_deref(), Some("c1"));
    }

    #[test]
    fn test_signature_is_not_checked() {
        let token = encode(
            &Header::default(),
            &json!({"userId": "u1", "role": "user"}),
            &EncodingKey::from_secret(b"some-other-secret"),
        )
        .unwrap();
        assert!(decode(&token).is_ok());
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        assert_eq!(decode(""), Err(DecodeFailure::Malformed));
        assert_eq!(decode("not-a-jwt"), Err(DecodeFailure::Malformed));
        assert_eq!(decode("a.b.c"), Err(DecodeFailure::Malformed));
    }

    #[test]
    fn test_unknown_role_is_invalid_claims() {
        let token = mint(json!({"userId": "u1", "role": "owner"}));
        assert!(matches!(decode(&token), Err(DecodeFailure::InvalidClaims(_))));
    }

    #[test]
    fn test_missing_role_is_invalid_claims() {
        let token = mint(json!({"userId": "u1"}));
        assert!(matches!(decode(&token), Err(DecodeFailure::InvalidClaims(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        let exp = (Utc::now() - Duration::hours(1)).timestamp();
        let token = mint(json!({"userId": "u1", "role": "user", "exp": exp}));
        assert_eq!(decode(&token), Err(DecodeFailure::Expired));
    }

    #[test]
    fn test_future_expiry_accepted() {
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let token = mint(json!({"userId": "u1", "role": "user", "exp": exp}));
        let identity = decode(&token).unwrap();
        assert_eq!(identity.expires_at.unwrap().timestamp(), exp);
    }
}
