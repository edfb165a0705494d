use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::AppError;
use crate::events::repo_types::{Event, NewEvent};

/// Body of `POST /events` and `PUT /events/:id`. Any owner id sent by the
/// client is ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    pub name: String,
    pub description: String,
    pub location: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date_time: OffsetDateTime,
}

impl EventRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [
            ("name", &self.name),
            ("description", &self.description),
            ("location", &self.location),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::parse(format!("Field '{field}' must not be empty.")));
            }
        }
        Ok(())
    }

    pub fn into_new_event(self, user_id: i64) -> NewEvent {
        NewEvent {
            name: self.name,
            description: self.description,
            location: self.location,
            date_time: self.date_time,
            user_id,
        }
    }

    pub fn apply_to(self, event: &mut Event) {
        event.name = self.name;
        event.description = self.description;
        event.location = self.location;
        event.date_time = self.date_time;
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedEventResponse {
    pub message: String,
    pub event: Event,
}
