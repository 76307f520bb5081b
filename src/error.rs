use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// AuthError
///
/// Failures raised while turning an `Authorization` header into trusted
/// claims. `MissingScheme` belongs to the codec stage (no `Bearer ` marker);
/// the rest belong to the validator stage. All map to 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("authorization header missing or not a bearer credential")]
    MissingScheme,
    #[error("token has expired")]
    Expired,
    #[error("token signature is invalid")]
    BadSignature,
    #[error("token is malformed or missing required claims")]
    Malformed,
}

/// DenyReason
///
/// Why the authorization policy refused a mutation. `NotOwner`: the caller's
/// role may mutate its own posts but the subject does not match the record's
/// owner. `NoRole`: the caller's role grants no mutation right at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    NotOwner,
    NoRole,
}

/// ApiError
///
/// The single error surface every handler returns. Each variant carries its
/// HTTP status and a stable machine-readable code; the response body is a
/// `{"error": {"code", "message"}}` envelope.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Auth(#[from] AuthError),

    #[error("mutation denied")]
    Forbidden(DenyReason),

    #[error("post not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Auth(AuthError::MissingScheme) => "MISSING_BEARER_SCHEME",
            ApiError::Auth(AuthError::Expired) => "TOKEN_EXPIRED",
            ApiError::Auth(AuthError::BadSignature) => "BAD_SIGNATURE",
            ApiError::Auth(AuthError::Malformed) => "MALFORMED_TOKEN",
            ApiError::Forbidden(DenyReason::NotOwner) => "NOT_OWNER",
            ApiError::Forbidden(DenyReason::NoRole) => "NO_ROLE",
            ApiError::NotFound => "NOT_FOUND",
            ApiError::Database(_) => "PERSISTENCE_ERROR",
        }
    }

    /// Caller-facing message. Database details stay in the server log; the
    /// client only sees a generic failure.
    fn public_message(&self) -> String {
        match self {
            ApiError::Forbidden(DenyReason::NotOwner) => {
                "you are not the owner of this post".to_string()
            }
            ApiError::Forbidden(DenyReason::NoRole) => {
                "your role does not permit this operation".to_string()
            }
            ApiError::Database(_) => "internal storage failure".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed with internal error");
        }

        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": self.public_message(),
            }
        }));

        (status, body).into_response()
    }
}
