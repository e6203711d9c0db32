//! Token verification capability

use async_trait::async_trait;

use crate::class::DecodedCredential;
use crate::error::AuthError;

/// Turns a raw token into a decoded credential.
///
/// Any error is an absence signal to the gate; the reason is not surfaced
/// to clients. Implementations may suspend (remote lookups etc).
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<DecodedCredential, AuthError>;
}

/// Verifier backed by a plain function returning `None` on rejection
pub struct FnVerifier<F> {
    verify: F,
}

impl<F> FnVerifier<F>
where
    F: Fn(&str) -> Option<DecodedCredential> + Send + Sync,
{
    pub fn new(verify: F) -> Self {
        Self { verify }
    }
}

#[async_trait]
impl<F> TokenVerifier for FnVerifier<F>
where
    F: Fn(&str) -> Option<DecodedCredential> + Send + Sync,
{
    async fn verify(&self, token: &str) -> Result<DecodedCredential, AuthError> {
        (self.verify)(token).ok_or(AuthError::InvalidToken)
    }
}
