//! Error types for the analyzer client.

use crate::browser::Field;
use crate::messages;
use thiserror::Error;

/// Why a backend call did not produce a value.
///
/// Screens branch on the variant to pick what the user sees; nothing here is
/// retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    /// The backend answered with a non-success status.
    #[error("request rejected ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Rejected { status: u16, detail: Option<String> },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// A response arrived but its body was not the expected JSON.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiFailure {
    pub fn rejected(status: u16, detail: Option<String>) -> Self {
        Self::Rejected { status, detail }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Text shown to the user for this failure.
    ///
    /// A backend `detail` is shown verbatim, a rejection without one falls
    /// back to `fallback`, and transport or decode failures get the generic
    /// network message.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiFailure::Rejected {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ApiFailure::Rejected { detail: None, .. } => fallback.to_string(),
            ApiFailure::Transport(_) | ApiFailure::Decode(_) => messages::NETWORK_ERROR.to_string(),
        }
    }
}

/// Input rejected before any request is sent.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{}", messages::WORD_REQUIRED)]
    WordRequired,
    #[error("{}", messages::ENGLISH_ONLY)]
    WordNotEnglish,
    #[error("{}", messages::ID_REQUIRED)]
    UsernameRequired,
    #[error("{}", messages::ID_TOO_SHORT)]
    UsernameTooShort,
    #[error("{}", messages::EMAIL_REQUIRED)]
    EmailRequired,
    #[error("{}", messages::EMAIL_INVALID)]
    EmailInvalid,
    #[error("{}", messages::PASSWORD_REQUIRED)]
    PasswordRequired,
    #[error("{}", messages::PASSWORD_TOO_SHORT)]
    PasswordTooShort,
}

impl ValidationError {
    /// The input field that should receive focus after this error.
    pub fn field(&self, login_form: bool) -> Field {
        match self {
            ValidationError::WordRequired | ValidationError::WordNotEnglish => Field::Word,
            ValidationError::UsernameRequired | ValidationError::UsernameTooShort => {
                if login_form {
                    Field::LoginUsername
                } else {
                    Field::RegisterUsername
                }
            }
            ValidationError::EmailRequired | ValidationError::EmailInvalid => Field::RegisterEmail,
            ValidationError::PasswordRequired | ValidationError::PasswordTooShort => {
                if login_form {
                    Field::LoginPassword
                } else {
                    Field::RegisterPassword
                }
            }
        }
    }
}

/// Setup-time failures: building the client, opening storage, rendering.
#[derive(Error, Debug)]
pub enum Error {
    #[error("storage io error: {0}")]
    StorageIo(#[from] std::io::Error),

    #[error("storage file is not valid JSON: {0}")]
    StorageFormat(#[from] serde_json::Error),

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("template error: {0}")]
    Render(#[from] askama::Error),

    #[error("configuration error: {0}")]
    Config(String),
}
