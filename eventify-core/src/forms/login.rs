//! Login form

use serde::{Deserialize, Serialize};

use super::FormError;

/// Username and password posted to the auth API
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields must be filled in
    pub fn validate(&self) -> Result<(), FormError> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err(FormError::MissingCredentials);
        }
        Ok(())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(Credentials::new("mor_2314", "83r5^_").validate().is_ok());
        assert_eq!(
            Credentials::new("", "pw").validate(),
            Err(FormError::MissingCredentials)
        );
        assert_eq!(
            Credentials::new("user", "").validate(),
            Err(FormError::MissingCredentials)
        );
    }

    #[test]
    fn test_debug_hides_password() {
        let debug = format!("{:?}", Credentials::new("user", "hunter2"));
        assert!(debug.contains("user"));
        assert!(!debug.contains("hunter2"));
    }
}
