//! Error types for Coursepad

use crate::auth::password::PasswordRule;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Every login failure maps here so callers can't tell an unknown
    /// email apart from a wrong password.
    #[error("Invalid email or password")]
    Authentication,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config file not found. Run 'coursepad init' first.")]
    ConfigNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("User '{0}' not found")]
    UserNotFound(String),

    #[error("Course '{0}' not found")]
    CourseNotFound(String),
}

/// Input that is malformed or violates a policy. Always recoverable by
/// correcting the input and retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    #[error("Email '{0}' is already registered")]
    EmailTaken(String),

    #[error("{0}")]
    WeakPassword(PasswordRule),

    #[error("Invalid user type '{0}', expected student, instructor or admin")]
    InvalidUserType(String),

    #[error("Invalid course {field}: {reason}")]
    InvalidCourse { field: &'static str, reason: String },

    #[error("Course '{0}' already exists")]
    DuplicateCourse(String),
}

impl Error {
    /// True for errors the caller can fix by changing its input
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, Error::Authentication)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
