use jsonwebtoken::{DecodingKey, Validation, decode, errors::ErrorKind};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Role
///
/// The caller's role as carried in the token. An explicit enum rather than a
/// string comparison: an unknown role value fails deserialization and the
/// whole token is rejected as malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

/// Claims
///
/// The payload structure expected inside an incoming JWT. Signed by the
/// identity service's secret and verified on every authenticated request;
/// nothing in here is trusted until `TokenVerifier::verify` succeeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): the unique identity of the caller.
    pub sub: String,
    /// The caller's role, used by the authorization policy.
    pub role: Role,
    /// Expiration time (exp): timestamp after which the token must not be
    /// accepted.
    pub exp: usize,
    /// Issued at (iat): timestamp when the token was issued.
    pub iat: usize,
}

/// TokenVerifier
///
/// Verifies signature, expiry, and structural integrity of a bearer token
/// against the process-wide shared secret, and extracts the claims.
/// Identical token and clock window always yield the same verdict.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::default();
        // Expiration validation is always active.
        validation.validate_exp = true;

        Self {
            decoding_key,
            validation,
        }
    }

    /// verify
    ///
    /// Either the full claim set comes back, or an error does; no partially
    /// decoded token ever leaves this function. Missing `sub`/`role` claims
    /// fail the `Claims` deserialization and surface as `Malformed`.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::Expired,
                    ErrorKind::InvalidSignature => AuthError::BadSignature,
                    // Bad segment counts, undecodable payloads, missing or
                    // unknown claims.
                    _ => AuthError::Malformed,
                }
            })?;

        let claims = token_data.claims;
        if claims.sub.is_empty() {
            return Err(AuthError::Malformed);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use std::time::SystemTime;

    const TEST_SECRET: &str = "verifier-test-secret-1234567890";

    fn unix_now() -> usize {
        SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap()
            .as_secs() as usize
    }

    fn sign(claims: &impl serde::Serialize, secret: &str) -> String {
        let key = EncodingKey::from_secret(secret.as_bytes());
        encode(&Header::default(), claims, &key).unwrap()
    }

    fn claims_for(sub: &str, role: Role, exp_offset: i64) -> Claims {
        let now = unix_now();
        Claims {
            sub: sub.to_string(),
            role,
            iat: now,
            exp: (now as i64 + exp_offset) as usize,
        }
    }

    #[test]
    fn test_valid_token_yields_claims() {
        let token = sign(&claims_for("alice", Role::User, 3600), TEST_SECRET);

        let claims = TokenVerifier::new(TEST_SECRET).verify(&token).unwrap();

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.role, Role::User);
    }

    #[test]
    fn test_expired_token_is_rejected_as_expired() {
        // Expired well past jsonwebtoken's default leeway.
        let token = sign(&claims_for("alice", Role::User, -600), TEST_SECRET);

        let result = TokenVerifier::new(TEST_SECRET).verify(&token);

        assert_eq!(result.unwrap_err(), AuthError::Expired);
    }

    #[test]
    fn test_wrong_secret_is_rejected_as_bad_signature() {
        let token = sign(&claims_for("alice", Role::Admin, 3600), "some-other-secret");

        let result = TokenVerifier::new(TEST_SECRET).verify(&token);

        assert_eq!(result.unwrap_err(), AuthError::BadSignature);
    }

    #[test]
    fn test_garbage_token_is_rejected_as_malformed() {
        let result = TokenVerifier::new(TEST_SECRET).verify("not-a-jwt-at-all");

        assert_eq!(result.unwrap_err(), AuthError::Malformed);
    }

    #[test]
    fn test_missing_role_claim_is_rejected_as_malformed() {
        let now = unix_now();
        let token = sign(
            &serde_json::json!({ "sub": "alice", "iat": now, "exp": now + 3600 }),
            TEST_SECRET,
        );

        let result = TokenVerifier::new(TEST_SECRET).verify(&token);

        assert_eq!(result.unwrap_err(), AuthError::Malformed);
    }

    #[test]
    fn test_missing_subject_claim_is_rejected_as_malformed() {
        let now = unix_now();
        let token = sign(
            &serde_json::json!({ "role": "USER", "iat": now, "exp": now + 3600 }),
            TEST_SECRET,
        );

        let result = TokenVerifier::new(TEST_SECRET).verify(&token);

        assert_eq!(result.unwrap_err(), AuthError::Malformed);
    }

    #[test]
    fn test_unknown_role_value_is_rejected_as_malformed() {
        let now = unix_now();
        let token = sign(
            &serde_json::json!({ "sub": "alice", "role": "SUPERUSER", "iat": now, "exp": now + 3600 }),
            TEST_SECRET,
        );

        let result = TokenVerifier::new(TEST_SECRET).verify(&token);

        assert_eq!(result.unwrap_err(), AuthError::Malformed);
    }

    #[test]
    fn test_empty_subject_is_rejected_as_malformed() {
        let token = sign(&claims_for("", Role::User, 3600), TEST_SECRET);

        let result = TokenVerifier::new(TEST_SECRET).verify(&token);

        assert_eq!(result.unwrap_err(), AuthError::Malformed);
    }

    #[test]
    fn test_role_wire_format_is_uppercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""ADMIN""#);
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""USER""#);
    }
}
