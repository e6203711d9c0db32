//! Authentication error types

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::class::CredentialClass;

/// Errors raised while issuing or verifying tokens.
///
/// These never reach the client: the gate collapses every one of them
/// into [`GateError::Invalid`].
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token issued for '{found}', expected '{expected}'")]
    ClassMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("Signing secret must not be empty")]
    EmptySecret,

    #[error("Token lifetime of {0} hours is out of range")]
    InvalidExpiry(i64),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Gate rejection. Always terminal, always 401.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateError {
    /// No token in the class cookie or the bearer header
    #[error("No {0} token provided")]
    Missing(&'static str),

    /// A token was found but the verifier did not accept it
    #[error("Invalid {0} token")]
    Invalid(&'static str),
}

impl GateError {
    pub fn missing<C: CredentialClass>() -> Self {
        GateError::Missing(C::NAME)
    }

    pub fn invalid<C: CredentialClass>() -> Self {
        GateError::Invalid(C::NAME)
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "message": self.to_string(),
        }));

        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}
