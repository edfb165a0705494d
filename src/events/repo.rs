use tracing::debug;

use crate::events::repo_types::{Event, NewEvent};
use crate::store::{Store, StoreError};

impl NewEvent {
    /// Insert the event and return it with its generated id.
    pub async fn save(&self, store: &dyn Store) -> Result<Event, StoreError> {
        let event = store.insert_event(self).await?;
        debug!(event_id = event.id, user_id = event.user_id, "event row inserted");
        Ok(event)
    }
}

impl Event {
    pub async fn all(store: &dyn Store) -> Result<Vec<Event>, StoreError> {
        store.list_events().await
    }

    pub async fn by_id(store: &dyn Store, id: i64) -> Result<Option<Event>, StoreError> {
        store.find_event(id).await
    }

    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }

    /// Persist name, description, location and date-time. Id and owner stay.
    pub async fn update(&self, store: &dyn Store) -> Result<(), StoreError> {
        store.update_event(self).await?;
        debug!(event_id = self.id, "event row updated");
        Ok(())
    }

    pub async fn delete(&self, store: &dyn Store) -> Result<(), StoreError> {
        store.delete_event(self.id).await?;
        debug!(event_id = self.id, "event row deleted");
        Ok(())
    }

    pub async fn register(&self, store: &dyn Store, user_id: i64) -> Result<(), StoreError> {
        store.insert_registration(self.id, user_id).await?;
        debug!(event_id = self.id, user_id, "registration stored");
        Ok(())
    }

    /// Does not need the event row: cancelling a missing registration is a no-op.
    pub async fn cancel_registration(
        store: &dyn Store,
        event_id: i64,
        user_id: i64,
    ) -> Result<(), StoreError> {
        store.delete_registration(event_id, user_id).await?;
        debug!(event_id, user_id, "registration removed");
        Ok(())
    }
}
