//! Bearer token extractor for protected routes.

use std::future::Future;
use std::pin::Pin;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::adapters::http::{ApiError, AppState};
use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Extracts and verifies the caller's identity from `Authorization: Bearer`.
///
/// Handlers that take this extractor refuse anonymous requests with 401
/// before any of their own logic runs.
pub struct RequireAuth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 AppState,
    ) -> Pin<Box<dyn Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>>
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let token = bearer_token(parts).ok_or(ApiError::from(AuthError::MissingToken))?;
            let user = state.verifier.verify(token).await.map_err(ApiError::from)?;
            Ok(RequireAuth(user))
        })
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn extracts_bearer_token() {
        let parts = parts_with(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts), Some("abc.def.ghi"));
    }

    #[test]
    fn rejects_missing_and_malformed_headers() {
        assert_eq!(bearer_token(&parts_with(None)), None);
        assert_eq!(bearer_token(&parts_with(Some("Basic xyz"))), None);
        assert_eq!(bearer_token(&parts_with(Some("Bearer "))), None);
    }
}
