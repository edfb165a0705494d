use tracing::debug;

use crate::auth::repo_types::User;
use crate::store::{Store, StoreError};

impl User {
    /// Find an account by its normalized email.
    pub async fn find_by_email(store: &dyn Store, email: &str) -> Result<Option<User>, StoreError> {
        store.find_user_by_email(email).await
    }

    /// Create an account. `password_hash` must already be hashed.
    pub async fn create(
        store: &dyn Store,
        email: &str,
        password_hash: String,
    ) -> Result<User, StoreError> {
        let id = store.insert_user(email, &password_hash).await?;
        debug!(user_id = id, "user row inserted");
        Ok(User {
            id,
            email: email.to_string(),
            password_hash,
        })
    }
}
