//! Static token verifier for tests: a fixed token-to-user table.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::TokenVerifier;

/// Accepts only the tokens it was told about.
#[derive(Default)]
pub struct MockTokenVerifier {
    users: HashMap<String, AuthenticatedUser>,
}

impl MockTokenVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token that verifies to the given user.
    pub fn allow(mut self, token: impl Into<String>, user_id: &str, name: Option<&str>) -> Self {
        let user = AuthenticatedUser::new(
            UserId::new(user_id).expect("non-empty user id"),
            name.map(String::from),
        );
        self.users.insert(token.into(), user);
        self
    }
}

#[async_trait]
impl TokenVerifier for MockTokenVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }
        self.users
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
