use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{Store, StoreError};
use crate::auth::repo_types::User;
use crate::events::repo_types::{Event, NewEvent};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    events: BTreeMap<i64, Event>,
    registrations: Vec<(i64, i64)>,
    next_user_id: i64,
    next_event_id: i64,
}

/// In-memory store mirroring the constraints of the SQL schema.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn registration_count(&self, event_id: i64, user_id: i64) -> usize {
        let t = self.tables.lock().unwrap();
        t.registrations
            .iter()
            .filter(|r| **r == (event_id, user_id))
            .count()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, email: &str, password_hash: &str) -> Result<i64, StoreError> {
        let mut t = self.tables.lock().unwrap();
        if t.users.values().any(|u| u.email == email) {
            return Err(StoreError::Duplicate);
        }
        t.next_user_id += 1;
        let id = t.next_user_id;
        t.users.insert(
            id,
            User {
                id,
                email: email.to_string(),
                password_hash: password_hash.to_string(),
            },
        );
        Ok(id)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let t = self.tables.lock().unwrap();
        Ok(t.users.values().find(|u| u.email == email).cloned())
    }

    async fn insert_event(&self, event: &NewEvent) -> Result<Event, StoreError> {
        let mut t = self.tables.lock().unwrap();
        t.next_event_id += 1;
        let stored = Event {
            id: t.next_event_id,
            name: event.name.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            date_time: event.date_time,
            user_id: event.user_id,
        };
        t.events.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        let t = self.tables.lock().unwrap();
        Ok(t.events.values().cloned().collect())
    }

    async fn find_event(&self, id: i64) -> Result<Option<Event>, StoreError> {
        let t = self.tables.lock().unwrap();
        Ok(t.events.get(&id).cloned())
    }

    async fn update_event(&self, event: &Event) -> Result<(), StoreError> {
        let mut t = self.tables.lock().unwrap();
        if let Some(row) = t.events.get_mut(&event.id) {
            row.name = event.name.clone();
            row.description = event.description.clone();
            row.location = event.location.clone();
            row.date_time = event.date_time;
        }
        Ok(())
    }

    async fn delete_event(&self, id: i64) -> Result<(), StoreError> {
        let mut t = self.tables.lock().unwrap();
        t.events.remove(&id);
        t.registrations.retain(|(event_id, _)| *event_id != id);
        Ok(())
    }

    async fn insert_registration(&self, event_id: i64, user_id: i64) -> Result<(), StoreError> {
        let mut t = self.tables.lock().unwrap();
        if !t.registrations.contains(&(event_id, user_id)) {
            t.registrations.push((event_id, user_id));
        }
        Ok(())
    }

    async fn delete_registration(&self, event_id: i64, user_id: i64) -> Result<(), StoreError> {
        let mut t = self.tables.lock().unwrap();
        t.registrations.retain(|r| *r != (event_id, user_id));
        Ok(())
    }
}
