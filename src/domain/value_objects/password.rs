use serde::{Deserialize, Serialize};

const MIN_PASSWORD_LEN: usize = 8;

/// User credential. `new` enforces complexity for locally created passwords;
/// `remote` wraps an opaque backend-issued credential without validating it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Password(String);

impl Password {
    pub fn new(value: String) -> Result<Self, String> {
        if value.len() < MIN_PASSWORD_LEN {
            return Err(format!(
                "Password must have at least {} characters",
                MIN_PASSWORD_LEN
            ));
        }
        if !value.chars().any(|c| c.is_ascii_alphabetic()) {
            return Err("Password must contain at least one letter".to_string());
        }
        if !value.chars().any(|c| c.is_ascii_digit()) {
            return Err("Password must contain at least one digit".to_string());
        }
        Ok(Self(value))
    }

    pub fn remote(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
