//! JWT token issuing and verification

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use tracing::debug;

use crate::class::{CredentialClass, DecodedCredential};
use crate::error::AuthError;
use crate::verifier::TokenVerifier;

/// Claims written into tokens minted by [`JwtVerifier::issue`]
#[derive(Debug, Serialize)]
struct IssuedClaims<'a> {
    /// Subject (account ID)
    sub: &'a str,
    /// Credential class name
    role: &'static str,
    /// Expiration time (Unix timestamp)
    exp: i64,
    /// Issued at (Unix timestamp)
    iat: i64,
}

/// HS256 JWT verifier for one credential class.
///
/// Each class is meant to get its own secret. Tokens must also carry a
/// `role` claim equal to the class name, so a token minted for one class
/// is refused by the other class's verifier even when secrets are shared.
pub struct JwtVerifier<C> {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_expiry_hours: i64,
    _class: PhantomData<fn() -> C>,
}

impl<C: CredentialClass> JwtVerifier<C> {
    /// Create a new verifier
    pub fn new(secret: &str, token_expiry_hours: i64) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::EmptySecret);
        }
        if Duration::try_hours(token_expiry_hours).is_none() {
            return Err(AuthError::InvalidExpiry(token_expiry_hours));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
            token_expiry_hours,
            _class: PhantomData,
        })
    }

    /// Mint a token for `subject`
    pub fn issue(&self, subject: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = Duration::try_hours(self.token_expiry_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or(AuthError::InvalidExpiry(self.token_expiry_hours))?;

        let claims = IssuedClaims {
            sub: subject,
            role: C::NAME,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        debug!("Issuing {} token for subject: {}", C::NAME, subject);

        encode(&Header::default(), &claims, &self.encoding_key).map_err(AuthError::Jwt)
    }

    /// Validate a token and return its claims
    pub fn decode(&self, token: &str) -> Result<DecodedCredential, AuthError> {
        let token_data = decode::<DecodedCredential>(token, &self.decoding_key, &self.validation)?;
        let claims = token_data.claims;

        // Check expiration
        let now = Utc::now().timestamp();
        if claims
            .get("exp")
            .and_then(Value::as_i64)
            .is_some_and(|exp| exp < now)
        {
            return Err(AuthError::TokenExpired);
        }

        match claims.get("role").and_then(Value::as_str) {
            Some(role) if role == C::NAME => Ok(claims),
            other => Err(AuthError::ClassMismatch {
                expected: C::NAME,
                found: other.unwrap_or_default().to_string(),
            }),
        }
    }
}

#[async_trait]
impl<C: CredentialClass> TokenVerifier for JwtVerifier<C> {
    async fn verify(&self, token: &str) -> Result<DecodedCredential, AuthError> {
        self.decode(token).inspect_err(|e| {
            debug!("Rejected {} token: {}", C::NAME, e);
        })
    }
}
