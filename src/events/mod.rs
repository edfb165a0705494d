pub mod dto;
pub mod handlers;
pub mod registrations;
pub mod repo;
pub mod repo_types;

use crate::state::AppState;
use axum::Router;

/// Routes anyone may call.
pub fn public_router() -> Router<AppState> {
    handlers::read_routes()
}

/// Routes that need an authenticated account; the caller wraps them in
/// the auth middleware.
pub fn protected_router() -> Router<AppState> {
    Router::new()
        .merge(handlers::write_routes())
        .merge(registrations::registration_routes())
}
