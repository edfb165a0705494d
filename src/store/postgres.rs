use async_trait::async_trait;
use sqlx::PgPool;

use super::{Store, StoreError};
use crate::auth::repo_types::User;
use crate::events::repo_types::{Event, NewEvent};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn insert_error(e: sqlx::Error) -> StoreError {
    let unique = e
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());
    if unique {
        StoreError::Duplicate
    } else {
        StoreError::Database(e)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, email: &str, password_hash: &str) -> Result<i64, StoreError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (email, password)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(insert_error)?;
        Ok(id)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert_event(&self, event: &NewEvent) -> Result<Event, StoreError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (name, description, location, date_time, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, location, date_time, user_id
            "#,
        )
        .bind(&event.name)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.date_time)
        .bind(event.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(insert_error)?;
        Ok(event)
    }

    async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        let rows = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, description, location, date_time, user_id
            FROM events
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_event(&self, id: i64) -> Result<Option<Event>, StoreError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, description, location, date_time, user_id
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(event)
    }

    async fn update_event(&self, event: &Event) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE events
               SET name = $1, description = $2, location = $3, date_time = $4
             WHERE id = $5
            "#,
        )
        .bind(&event.name)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.date_time)
        .bind(event.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_event(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn insert_registration(&self, event_id: i64, user_id: i64) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO registrations (event_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (event_id, user_id) DO NOTHING
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(insert_error)?;
        Ok(())
    }

    async fn delete_registration(&self, event_id: i64, user_id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM registrations WHERE event_id = $1 AND user_id = $2")
            .bind(event_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
