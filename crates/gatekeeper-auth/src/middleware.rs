//! Access gate middleware for Axum

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use futures::FutureExt;
use http::HeaderMap;
use http::request::Parts;
use std::marker::PhantomData;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use crate::class::{Admin, Credential, CredentialClass, DecodedCredential, User};
use crate::error::GateError;
use crate::token::extract_token;
use crate::verifier::TokenVerifier;

/// How long a verifier may take before the token counts as invalid
pub const DEFAULT_VERIFY_TIMEOUT: Duration = Duration::from_secs(2);

/// Per-request gate for one credential class.
///
/// Holds no per-request state; clones share the same verifier.
pub struct AccessGate<C> {
    verifier: Arc<dyn TokenVerifier>,
    verify_timeout: Duration,
    _class: PhantomData<fn() -> C>,
}

/// Gate guarding admin routes (`admin-token` cookie)
pub type AdminGate = AccessGate<Admin>;
/// Gate guarding user routes (`user-token` cookie)
pub type UserGate = AccessGate<User>;

impl<C: CredentialClass> AccessGate<C> {
    /// Create a gate around a verifier
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self {
            verifier,
            verify_timeout: DEFAULT_VERIFY_TIMEOUT,
            _class: PhantomData,
        }
    }

    pub fn with_verify_timeout(mut self, verify_timeout: Duration) -> Self {
        self.verify_timeout = verify_timeout;
        self
    }

    /// Decide whether the request carries a valid credential of class `C`
    pub async fn authorize(&self, headers: &HeaderMap) -> Result<Credential<C>, GateError> {
        let token = extract_token(headers, C::COOKIE_NAME).ok_or_else(GateError::missing::<C>)?;
        let decoded = self.verify(&token).await.ok_or_else(GateError::invalid::<C>)?;

        Ok(Credential::new(decoded))
    }

    /// Run the verifier. Errors, panics and timeouts all come back as `None`.
    async fn verify(&self, token: &str) -> Option<DecodedCredential> {
        let outcome = AssertUnwindSafe(self.verifier.verify(token)).catch_unwind();

        match tokio::time::timeout(self.verify_timeout, outcome).await {
            Ok(Ok(Ok(decoded))) => Some(decoded),
            _ => None,
        }
    }
}

impl<C> Clone for AccessGate<C> {
    fn clone(&self) -> Self {
        Self {
            verifier: Arc::clone(&self.verifier),
            verify_timeout: self.verify_timeout,
            _class: PhantomData,
        }
    }
}

/// Access gate middleware
///
/// On success the decoded credential is stored in the request extensions
/// as a [`Credential<C>`] and the next handler runs once. Otherwise the
/// request ends here with a 401.
pub async fn access_gate<C: CredentialClass>(
    State(gate): State<AccessGate<C>>,
    mut request: Request,
    next: Next,
) -> Result<Response, GateError> {
    let credential = gate.authorize(request.headers()).await?;

    request.extensions_mut().insert(credential);

    Ok(next.run(request).await)
}

/// Extractor for the credential attached by the gate.
///
/// Rejects with the class's missing-token error when the route was not
/// put behind the matching gate.
impl<C, S> FromRequestParts<S> for Credential<C>
where
    C: CredentialClass,
    S: Send + Sync,
{
    type Rejection = GateError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Credential<C>>()
            .cloned()
            .ok_or_else(GateError::missing::<C>)
    }
}
