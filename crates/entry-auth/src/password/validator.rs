//! Password policy enforcement for new passwords.

use std::collections::BTreeMap;

use entry_core::config::AuthConfig;
use entry_core::error::AppError;

/// Longest password Argon2 callers accept, in bytes.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length in bytes.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Checks a password against length bounds and a zxcvbn strength
    /// estimate, returning the failure message if it is rejected.
    pub fn check(&self, password: &str) -> Option<String> {
        if password.is_empty() {
            Some("must be provided".to_string())
        } else if password.len() < self.min_length {
            Some(format!("must be at least {} bytes long", self.min_length))
        } else if password.len() > MAX_PASSWORD_BYTES {
            Some(format!("must not be more than {MAX_PASSWORD_BYTES} bytes long"))
        } else if zxcvbn::zxcvbn(password, &[]).score() < zxcvbn::Score::Three {
            Some("is too easy to guess".to_string())
        } else {
            None
        }
    }

    /// Like [`PasswordValidator::check`], reporting a failure as a
    /// validation error on the `password` field.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        match self.check(password) {
            None => Ok(()),
            Some(message) => {
                let mut fields = BTreeMap::new();
                fields.insert("password".to_string(), message);
                Err(AppError::failed_validation(fields))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> PasswordValidator {
        PasswordValidator::new(&AuthConfig::default())
    }

    fn password_error(password: &str) -> String {
        let err = validator().validate(password).unwrap_err();
        err.details.unwrap()["password"].as_str().unwrap().to_string()
    }

    #[test]
    fn test_strong_password_accepted() {
        assert!(validator().validate("violet-kettle-harbor-93").is_ok());
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(password_error(""), "must be provided");
        assert_eq!(password_error("short"), "must be at least 8 bytes long");
        assert_eq!(
            password_error(&"x".repeat(73)),
            "must not be more than 72 bytes long"
        );
    }

    #[test]
    fn test_weak_password_rejected() {
        assert_eq!(password_error("password"), "is too easy to guess");
    }
}
