use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};

use crate::{
    config::AppConfig,
    error::{ApiError, AuthError},
};

// Scheme handling, separate from cryptographic validation.
pub mod codec;
// Ownership-or-admin decisions over validated identities.
pub mod policy;
// Signature, expiry, and claim-shape verification.
pub mod verifier;

pub use verifier::{Claims, Role, TokenVerifier};

/// AuthUser
///
/// The resolved identity of an authenticated request: the trusted subset of
/// claims the handlers and the authorization policy act on. Only constructed
/// after the full decode-and-verify chain succeeds.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub subject: String,
    pub role: Role,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            subject: claims.sub,
            role: claims.role,
        }
    }
}

/// AuthUser Extractor Implementation
///
/// Implements Axum's FromRequestParts trait, making AuthUser usable as a
/// function argument in any authenticated handler. The identity therefore
/// travels explicitly through handler signatures; there is no ambient
/// "current user" state anywhere in the crate.
///
/// The chain per request: read the Authorization header, strip the bearer
/// scheme (codec), verify signature/expiry/shape against the process-wide
/// secret (verifier). Every mutating request re-runs the whole chain from the
/// raw header; validated tokens are never cached.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    // Allows the extractor to pull the AppConfig (for the JWT secret).
    AppConfig: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::MissingScheme)?;

        let token = codec::strip_bearer(auth_header)?;
        let claims = TokenVerifier::new(&config.jwt_secret).verify(token)?;

        Ok(AuthUser::from(claims))
    }
}
