//! Auth gate - turns request headers into a caller identity.
//!
//! Sign-in flows are out of scope. The shipped [`TokenGate`] only checks a presented
//! token (bearer header or session cookie) against the tokens in the configuration.

use crate::{
    config::site::AdminToken,
    errors::{Error, Result},
};
use axum::http::{HeaderMap, header};

/// Role name that unlocks the admin area.
pub const ADMIN_ROLE: &str = "admin";

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "storefront_session";

/// Who is making a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    Anonymous,
    User { role: String },
}

impl Caller {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::User { role } if role == ADMIN_ROLE)
    }
}

/// Resolves the caller of a request.
pub trait AuthGate: Send + Sync {
    fn current_caller(&self, headers: &HeaderMap) -> Caller;
}

/// Admits admins only.
///
/// # Errors
/// `Unauthorized` for anonymous callers, `Forbidden` for any other role.
pub fn require_admin(caller: &Caller) -> Result<()> {
    match caller {
        Caller::Anonymous => Err(Error::Unauthorized),
        Caller::User { .. } if caller.is_admin() => Ok(()),
        Caller::User { .. } => Err(Error::Forbidden),
    }
}

/// Matches a presented token against a fixed token list.
#[derive(Debug, Clone, Default)]
pub struct TokenGate {
    tokens: Vec<AdminToken>,
}

impl TokenGate {
    #[must_use]
    pub const fn new(tokens: Vec<AdminToken>) -> Self {
        Self { tokens }
    }

    fn presented_token(headers: &HeaderMap) -> Option<&str> {
        let bearer = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim);

        bearer.or_else(|| {
            headers
                .get_all(header::COOKIE)
                .iter()
                .filter_map(|value| value.to_str().ok())
                .flat_map(|cookies| cookies.split(';'))
                .filter_map(|cookie| cookie.trim().split_once('='))
                .find(|(name, _)| *name == SESSION_COOKIE)
                .map(|(_, value)| value)
        })
    }
}

impl AuthGate for TokenGate {
    fn current_caller(&self, headers: &HeaderMap) -> Caller {
        let Some(presented) = Self::presented_token(headers) else {
            return Caller::Anonymous;
        };
        self.tokens
            .iter()
            .find(|known| known.token == presented)
            .map_or(Caller::Anonymous, |known| Caller::User {
                role: known.role.clone(),
            })
    }
}
