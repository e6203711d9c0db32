//! Credential classes and decoded credentials

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::marker::PhantomData;

/// A class of credential guarded by its own gate.
///
/// The class fixes the cookie a token is read from, the wording of the
/// rejection messages and the request slot the decoded credential lands in.
pub trait CredentialClass: Send + Sync + 'static {
    /// Class name (`admin`, `user`)
    const NAME: &'static str;
    /// Cookie carrying this class's token
    const COOKIE_NAME: &'static str;
}

/// Administrator credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admin;

impl CredentialClass for Admin {
    const NAME: &'static str = "admin";
    const COOKIE_NAME: &'static str = "admin-token";
}

/// Regular user credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct User;

impl CredentialClass for User {
    const NAME: &'static str = "user";
    const COOKIE_NAME: &'static str = "user-token";
}

/// Claims produced by a verifier. The gate never looks inside.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecodedCredential(Map<String, Value>);

impl DecodedCredential {
    pub fn new(claims: Map<String, Value>) -> Self {
        Self(claims)
    }

    /// Look up a single claim
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// The `sub` claim, if it is a string
    pub fn subject(&self) -> Option<&str> {
        self.get("sub").and_then(Value::as_str)
    }

    pub fn claims(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_claims(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for DecodedCredential {
    fn from(claims: Map<String, Value>) -> Self {
        Self(claims)
    }
}

/// A verified credential of class `C`.
///
/// Only the gate for `C` creates these, and it stores exactly one per
/// request in the request extensions.
pub struct Credential<C> {
    decoded: DecodedCredential,
    _class: PhantomData<fn() -> C>,
}

impl<C: CredentialClass> Credential<C> {
    pub(crate) fn new(decoded: DecodedCredential) -> Self {
        Self {
            decoded,
            _class: PhantomData,
        }
    }

    /// Name of the request slot this credential occupies
    pub fn slot(&self) -> &'static str {
        C::NAME
    }

    pub fn decoded(&self) -> &DecodedCredential {
        &self.decoded
    }

    pub fn claims(&self) -> &Map<String, Value> {
        self.decoded.claims()
    }

    pub fn into_decoded(self) -> DecodedCredential {
        self.decoded
    }
}

impl<C> Clone for Credential<C> {
    fn clone(&self) -> Self {
        Self {
            decoded: self.decoded.clone(),
            _class: PhantomData,
        }
    }
}

impl<C: CredentialClass> fmt::Debug for Credential<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("class", &C::NAME)
            .field("claims", self.decoded.claims())
            .finish()
    }
}
