use crate::domain::entities::User;
use crate::domain::value_objects::{Email, Password, PersonName};
use crate::infrastructure::database::CacheStore;
use crate::shared::{AppError, Result};
use sqlx::Row;

#[derive(Clone)]
pub struct UserCache {
    store: CacheStore,
}

impl UserCache {
    pub fn new(store: CacheStore) -> Self {
        Self { store }
    }

    /// Credentials are never mirrored; cached users carry an opaque
    /// placeholder password.
    pub async fn get_user(&self, id: &str) -> Result<Option<User>> {
        let pool = self.store.connection()?;
        let row = sqlx::query("SELECT id, name, email, avatar_url FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        let row = match row {
            Some(row) => row,
            None => return Ok(None),
        };

        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let email: String = row.try_get("email")?;
        let avatar_url: Option<String> = row.try_get("avatar_url")?;

        let name = PersonName::new(name).map_err(AppError::ValidationError)?;
        let email = Email::new(email).map_err(AppError::ValidationError)?;

        Ok(Some(User::new(
            id,
            name,
            email,
            Password::remote(String::new()),
            avatar_url,
        )))
    }
}
