//! Token verification adapters.

mod jwt;
mod mock;

pub use jwt::JwtTokenVerifier;
pub use mock::MockTokenVerifier;
