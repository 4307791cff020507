use crate::application::ports::repositories::AuthRepository;
use crate::domain::entities::User;
use crate::domain::value_objects::Email;
use crate::shared::{AppError, Result};
use std::sync::Arc;

/// Thin auth use cases over the hybrid auth repository. Input shape is
/// validated here; credential checking belongs to the backend.
pub struct AuthService {
    auth: Arc<dyn AuthRepository>,
}

impl AuthService {
    pub fn new(auth: Arc<dyn AuthRepository>) -> Self {
        Self { auth }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User> {
        let email = Email::new(email.to_string()).map_err(AppError::InvalidInput)?;
        if password.is_empty() {
            return Err(AppError::InvalidInput("Password cannot be empty".into()));
        }
        self.auth.sign_in(email.as_str(), password).await
    }

    pub async fn sign_out(&self, user_id: &str) -> Result<()> {
        self.auth.sign_out(user_id).await
    }

    pub async fn current_user(&self, user_id: &str) -> Result<Option<User>> {
        self.auth.current_user(user_id).await
    }
}
