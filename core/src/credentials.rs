//! Bearer credential context.
//!
//! The token is owned by whatever authentication flow sits outside this
//! crate. Callers hand a `Credentials` value to every request-building call
//! instead of the client reading a global slot, so tests can drive token
//! lifecycle directly.

use std::fmt;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    token: Option<String>,
}

impl Credentials {
    /// No token: requests go out without an `Authorization` header.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// An empty token is treated the same as no token.
    pub fn bearer(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            token: (!token.is_empty()).then_some(token),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Value for the `Authorization` header, if a token is held.
    pub fn authorization(&self) -> Option<String> {
        self.token().map(|token| format!("Bearer {token}"))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = self.token.as_ref().map(|_| "<redacted>");
        f.debug_struct("Credentials").field("token", &token).finish()
    }
}
