use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use super::middleware::NOT_AUTHORIZED;
use crate::error::AppError;

/// Account id resolved by [`super::middleware::require_auth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUser>().copied().ok_or_else(|| {
            // Only reachable when a handler is mounted outside the protected group
            warn!("AuthUser missing from request extensions");
            AppError::Auth(NOT_AUTHORIZED)
        })
    }
}
