//! Login and signup form validation.
//!
//! These forms are mockups: validation only checks that the form is filled in
//! coherently. No credentials are stored or verified anywhere.

use serde::Deserialize;

use super::email::{Email, EmailError};

/// Where the client goes after a successful login.
pub const LOGIN_REDIRECT: &str = "/home";

/// Where the client goes after a successful signup.
pub const SIGNUP_REDIRECT: &str = "/login";

/// Reasons an account form is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountError {
    /// A required field was left blank.
    #[error("Please fill in all fields")]
    MissingFields,
    /// The password and its confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,
    /// The email field is not an address.
    #[error("Invalid email address: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// Login form submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    /// Check the form and return the parsed email.
    ///
    /// # Errors
    ///
    /// [`AccountError::MissingFields`] when either field is blank, otherwise
    /// [`AccountError::InvalidEmail`] when the email does not parse.
    pub fn validate(&self) -> Result<Email, AccountError> {
        if is_blank(&self.email) || self.password.is_empty() {
            return Err(AccountError::MissingFields);
        }
        Ok(Email::parse(&self.email)?)
    }
}

/// Signup form submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl SignupForm {
    /// Check the form and return the parsed email.
    ///
    /// # Errors
    ///
    /// [`AccountError::MissingFields`] when email or password is blank,
    /// [`AccountError::PasswordMismatch`] when the confirmation differs,
    /// [`AccountError::InvalidEmail`] when the email does not parse.
    pub fn validate(&self) -> Result<Email, AccountError> {
        if is_blank(&self.email) || self.password.is_empty() {
            return Err(AccountError::MissingFields);
        }
        if self.password != self.confirm_password {
            return Err(AccountError::PasswordMismatch);
        }
        Ok(Email::parse(&self.email)?)
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_login_requires_both_fields() {
        let form = LoginForm {
            email: "sara@example.com".to_string(),
            password: String::new(),
        };
        assert_eq!(form.validate(), Err(AccountError::MissingFields));

        let form = LoginForm {
            email: "  ".to_string(),
            password: "hunter2".to_string(),
        };
        assert_eq!(form.validate(), Err(AccountError::MissingFields));
    }

    #[test]
    fn test_login_ok() {
        let form = LoginForm {
            email: "sara@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        assert_eq!(form.validate().unwrap().as_str(), "sara@example.com");
    }

    #[test]
    fn test_login_bad_email() {
        let form = LoginForm {
            email: "sara".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(matches!(form.validate(), Err(AccountError::InvalidEmail(_))));
    }

    #[test]
    fn test_signup_password_mismatch() {
        let form = SignupForm {
            email: "sara@example.com".to_string(),
            password: "one".to_string(),
            confirm_password: "two".to_string(),
        };
        assert_eq!(form.validate(), Err(AccountError::PasswordMismatch));
        assert_eq!(
            AccountError::PasswordMismatch.to_string(),
            "Passwords do not match"
        );
    }

    #[test]
    fn test_signup_ok() {
        let form = SignupForm {
            email: "sara@example.com".to_string(),
            password: "same".to_string(),
            confirm_password: "same".to_string(),
        };
        assert!(form.validate().is_ok());
    }
}
