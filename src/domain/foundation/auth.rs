//! Authentication types for the domain layer.
//!
//! These types represent an authenticated user extracted from a signed bearer
//! token. They have no crypto dependencies; the `TokenVerifier` port populates
//! them, whether that is the HS256 adapter or a mock in tests.

use super::UserId;
use thiserror::Error;

/// Authenticated user extracted from a validated token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the `id` claim.
    pub id: UserId,

    /// Display name if the issuer put one in the token.
    pub name: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, name: Option<String>) -> Self {
        Self { id, name }
    }

    /// Returns the user's display name, or the id as fallback.
    pub fn name_or_id(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.id.as_str())
    }
}

/// Authentication errors that can occur during token validation.
///
/// These are domain-centric; a refused WebSocket connect and an HTTP 401
/// both come down to one of these.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing entirely.
    #[error("Authentication token required")]
    MissingToken,

    /// The token is malformed or has an invalid signature.
    #[error("Invalid token")]
    InvalidToken,

    /// The token signature is valid but it has expired.
    #[error("Token expired")]
    TokenExpired,
}
