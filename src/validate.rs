//! Input checks that run before any request is sent.

use crate::error::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;

static ENGLISH_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]+$").expect("valid word pattern"));
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 4;

/// Returns the trimmed word when it is non-empty ASCII letters only.
pub fn validate_word(input: &str) -> Result<&str, ValidationError> {
    let word = input.trim();
    if word.is_empty() {
        return Err(ValidationError::WordRequired);
    }
    if !ENGLISH_WORD.is_match(word) {
        return Err(ValidationError::WordNotEnglish);
    }
    Ok(word)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegistrationForm {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Trims every field and checks them in form order.
    pub fn validate(&self) -> Result<RegistrationForm, ValidationError> {
        let username = self.username.trim();
        let email = self.email.trim();
        let password = self.password.trim();

        if username.is_empty() {
            return Err(ValidationError::UsernameRequired);
        }
        if username.chars().count() < MIN_USERNAME_LEN {
            return Err(ValidationError::UsernameTooShort);
        }
        if email.is_empty() {
            return Err(ValidationError::EmailRequired);
        }
        if !EMAIL.is_match(email) {
            return Err(ValidationError::EmailInvalid);
        }
        if password.is_empty() {
            return Err(ValidationError::PasswordRequired);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort);
        }
        Ok(RegistrationForm::new(username, email, password))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<LoginForm, ValidationError> {
        let username = self.username.trim();
        let password = self.password.trim();
        if username.is_empty() {
            return Err(ValidationError::UsernameRequired);
        }
        if password.is_empty() {
            return Err(ValidationError::PasswordRequired);
        }
        Ok(LoginForm::new(username, password))
    }
}
