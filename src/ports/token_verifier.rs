//! Token verification port.
//!
//! One enforcement contract, two enforcement points: the HTTP bearer
//! middleware and the WebSocket authentication gate both validate the same
//! signed credential through this trait, so swapping the signing scheme (or
//! using a mock in tests) touches neither.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates a signed bearer credential and extracts the user identity.
///
/// # Contract
///
/// Implementations must:
/// - Validate the token signature against the shared signing secret
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::InvalidToken` for anything else that fails validation
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Validate a raw token (without "Bearer " prefix) and return the user.
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn TokenVerifier) {}
}
