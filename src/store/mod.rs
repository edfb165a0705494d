//! Persistence gateway.
//!
//! Handlers never talk to the pool directly: they go through the domain
//! records, which call into a [`Store`]. `PgStore` is the production
//! implementation; tests swap in an in-memory one.

use async_trait::async_trait;
use thiserror::Error;

use crate::auth::repo_types::User;
use crate::events::repo_types::{Event, NewEvent};

mod postgres;

#[cfg(test)]
pub mod memory;

pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the insert.
    #[error("duplicate record")]
    Duplicate,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Insert an account and return its generated id.
    async fn insert_user(&self, email: &str, password_hash: &str) -> Result<i64, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn insert_event(&self, event: &NewEvent) -> Result<Event, StoreError>;
    async fn list_events(&self) -> Result<Vec<Event>, StoreError>;
    async fn find_event(&self, id: i64) -> Result<Option<Event>, StoreError>;
    /// Overwrite name, description, location and date-time of `event.id`.
    async fn update_event(&self, event: &Event) -> Result<(), StoreError>;
    async fn delete_event(&self, id: i64) -> Result<(), StoreError>;

    /// Idempotent: registering twice keeps a single row.
    async fn insert_registration(&self, event_id: i64, user_id: i64) -> Result<(), StoreError>;
    /// Deleting a registration that does not exist is not an error.
    async fn delete_registration(&self, event_id: i64, user_id: i64) -> Result<(), StoreError>;
}
