use crate::application::ports::remote::RemoteUser;
use crate::domain::entities::User;
use crate::domain::value_objects::{Email, Password, PersonName};
use crate::shared::{AppError, Result};

/// Remote credentials are opaque; the placeholder password path skips the
/// local complexity rules.
pub fn map_user(record: &RemoteUser) -> Result<User> {
    let name = PersonName::new(record.name.clone()).map_err(AppError::ValidationError)?;
    let email = Email::new(record.email.clone()).map_err(AppError::ValidationError)?;
    Ok(User::new(
        record.id.clone(),
        name,
        email,
        Password::remote(String::new()),
        record.avatar_url.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_user_uses_opaque_password() {
        let user = map_user(&RemoteUser {
            id: "u1".into(),
            name: "Ana".into(),
            email: "ana@example.com".into(),
            avatar_url: None,
        })
        .unwrap();
        assert_eq!(user.password.as_str(), "");
    }

    #[test]
    fn test_map_user_still_validates_email() {
        assert!(map_user(&RemoteUser {
            id: "u1".into(),
            name: "Ana".into(),
            email: "broken".into(),
            avatar_url: None,
        })
        .is_err());
    }
}
