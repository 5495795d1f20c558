//! HS256 bearer token verification against the shared issuer secret.
//!
//! Tokens are minted by the separate auth service; this backend only
//! verifies them. The subject lives in the `id` claim, with an optional
//! `name` claim for display.

use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::TokenVerifier;

#[derive(Debug, Deserialize)]
struct Claims {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[allow(dead_code)]
    exp: usize,
}

/// Verifies HS256 tokens signed with the shared secret.
pub struct JwtTokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtTokenVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

#[async_trait]
impl TokenVerifier for JwtTokenVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        let data =
            decode::<Claims>(token, &self.key, &self.validation).map_err(|error| {
                match error.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => AuthError::InvalidToken,
                }
            })?;

        let id = UserId::new(data.claims.id).map_err(|_| AuthError::InvalidToken)?;
        Ok(AuthenticatedUser::new(id, data.claims.name))
    }
}
