//! Gatekeeper Authentication
//!
//! This crate provides the access gate that guards admin and user routes:
//! credential extraction from cookies or bearer headers, verification
//! through a pluggable [`TokenVerifier`], and attachment of the decoded
//! credential to the request.

pub mod class;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod token;
pub mod verifier;

pub use class::{Admin, Credential, CredentialClass, DecodedCredential, User};
pub use error::{AuthError, GateError};
pub use jwt::JwtVerifier;
pub use middleware::{AccessGate, AdminGate, DEFAULT_VERIFY_TIMEOUT, UserGate, access_gate};
pub use token::{bearer_token, cookie_value, extract_token};
pub use verifier::{FnVerifier, TokenVerifier};
