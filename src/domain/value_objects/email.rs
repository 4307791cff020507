use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    pub fn new(value: String) -> Result<Self, String> {
        let trimmed = value.trim().to_lowercase();
        Self::validate(&trimmed)?;
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(value: &str) -> Result<(), String> {
        let (local, domain) = value
            .split_once('@')
            .ok_or_else(|| "Email must contain '@'".to_string())?;
        if local.is_empty() {
            return Err("Email local part cannot be empty".to_string());
        }
        if domain.is_empty() || !domain.contains('.') || domain.starts_with('.') {
            return Err(format!("Email domain '{}' is not valid", domain));
        }
        Ok(())
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_accepts_and_normalizes() {
        let email = Email::new(" Ana@Example.COM ".to_string()).unwrap();
        assert_eq!(email.as_str(), "ana@example.com");
    }

    #[test]
    fn test_email_rejects_malformed() {
        assert!(Email::new("not-an-email".to_string()).is_err());
        assert!(Email::new("@example.com".to_string()).is_err());
        assert!(Email::new("ana@".to_string()).is_err());
        assert!(Email::new("ana@localhost".to_string()).is_err());
    }
}
