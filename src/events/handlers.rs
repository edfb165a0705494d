use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::extractors::AuthUser,
    dto::MessageResponse,
    error::AppError,
    events::{
        dto::{CreatedEventResponse, EventRequest},
        repo_types::Event,
    },
    state::AppState,
};

pub(super) const EVENT_NOT_FOUND: &str = "Could not find event.";

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events))
        .route("/events/:id", get(get_event))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(create_event))
        .route("/events/:id", put(update_event).delete(delete_event))
}

/// Loads an event the caller is about to mutate. The fetch result is
/// checked before ownership so a missing row never reaches the comparison.
async fn owned_event(state: &AppState, id: i64, user_id: i64) -> Result<Event, AppError> {
    let event = Event::by_id(state.store.as_ref(), id)
        .await
        .map_err(AppError::persistence("Could not fetch the event."))?
        .ok_or(AppError::NotFound(EVENT_NOT_FOUND))?;

    if !event.is_owned_by(user_id) {
        warn!(event_id = id, user_id, owner = event.user_id, "not the event owner");
        return Err(AppError::Auth("Not authorized to modify this event."));
    }
    Ok(event)
}

#[instrument(skip(state))]
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, AppError> {
    let events = Event::all(state.store.as_ref())
        .await
        .map_err(AppError::persistence("Could not fetch events. Try again later."))?;
    Ok(Json(events))
}

#[instrument(skip(state))]
pub async fn get_event(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Event>, AppError> {
    let Path(id) = id?;
    let event = Event::by_id(state.store.as_ref(), id)
        .await
        .map_err(AppError::persistence("Could not fetch the event."))?
        .ok_or(AppError::NotFound(EVENT_NOT_FOUND))?;
    Ok(Json(event))
}

#[instrument(skip(state, payload))]
pub async fn create_event(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<EventRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedEventResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let event = payload
        .into_new_event(user_id)
        .save(state.store.as_ref())
        .await
        .map_err(AppError::persistence("Could not create event. Try again later."))?;

    info!(event_id = event.id, user_id, "event created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedEventResponse {
            message: "Event created.".into(),
            event,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_event(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<EventRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id?;
    let mut event = owned_event(&state, id, user_id).await?;

    let Json(payload) = payload?;
    payload.validate()?;
    payload.apply_to(&mut event);

    event
        .update(state.store.as_ref())
        .await
        .map_err(AppError::persistence("Could not update event."))?;

    info!(event_id = id, user_id, "event updated");
    Ok(Json(MessageResponse::new("Event updated successfully.")))
}

#[instrument(skip(state))]
pub async fn delete_event(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id?;
    let event = owned_event(&state, id, user_id).await?;

    event
        .delete(state.store.as_ref())
        .await
        .map_err(AppError::persistence("Could not delete event."))?;

    info!(event_id = id, user_id, "event deleted");
    Ok(Json(MessageResponse::new("Event deleted successfully.")))
}
