use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Account record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,                      // account ID
    pub email: String,                // normalized email
    #[serde(skip_serializing)]
    #[sqlx(rename = "password")]
    pub password_hash: String,        // Argon2 hash, not exposed in JSON
}
