use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument};

use super::handlers::EVENT_NOT_FOUND;
use crate::{
    auth::extractors::AuthUser, dto::MessageResponse, error::AppError,
    events::repo_types::Event, state::AppState,
};

pub fn registration_routes() -> Router<AppState> {
    Router::new().route(
        "/events/:id/register",
        post(register_for_event).delete(cancel_registration),
    )
}

#[instrument(skip(state))]
pub async fn register_for_event(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    id: Result<Path<i64>, PathRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let Path(id) = id?;
    let event = Event::by_id(state.store.as_ref(), id)
        .await
        .map_err(AppError::persistence("Could not fetch the event."))?
        .ok_or(AppError::NotFound(EVENT_NOT_FOUND))?;

    event
        .register(state.store.as_ref(), user_id)
        .await
        .map_err(AppError::persistence("Could not register user for event."))?;

    info!(event_id = id, user_id, "registered for event");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Registered for event.")),
    ))
}

#[instrument(skip(state))]
pub async fn cancel_registration(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id?;
    Event::cancel_registration(state.store.as_ref(), id, user_id)
        .await
        .map_err(AppError::persistence("Could not cancel registration."))?;

    info!(event_id = id, user_id, "registration cancelled");
    Ok(Json(MessageResponse::new("Registration cancelled.")))
}
