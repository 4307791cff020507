use crate::domain::value_objects::{Email, Password, PersonName};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: PersonName,
    pub email: Email,
    pub password: Password,
    pub avatar_url: Option<String>,
}

impl User {
    pub fn new(
        id: String,
        name: PersonName,
        email: Email,
        password: Password,
        avatar_url: Option<String>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password,
            avatar_url,
        }
    }
}
