use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use super::{extractors::AuthUser, jwt::JwtKeys};
use crate::error::AppError;

/// Same answer for a missing and a bad token.
pub const NOT_AUTHORIZED: &str = "Not authorized.";

/// Token from the `Authorization` header, with or without a `Bearer ` prefix.
fn header_token(headers: &HeaderMap) -> Option<&str> {
    let raw = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = raw
        .strip_prefix("Bearer ")
        .or_else(|| raw.strip_prefix("bearer "))
        .unwrap_or(raw)
        .trim();
    (!token.is_empty()).then_some(token)
}

/// Guards the protected route group: verifies the bearer token and stores
/// the account id in the request extensions for [`AuthUser`].
pub async fn require_auth(
    State(keys): State<JwtKeys>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = header_token(request.headers()) else {
        warn!("missing Authorization header");
        return Err(AppError::Auth(NOT_AUTHORIZED));
    };

    let claims = keys.verify(token).map_err(|_| {
        warn!("invalid or expired token");
        AppError::Auth(NOT_AUTHORIZED)
    })?;

    request.extensions_mut().insert(AuthUser(claims.user_id));
    Ok(next.run(request).await)
}
