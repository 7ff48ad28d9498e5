//! Authentication models

use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of account. Stored as a tag only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Student,
    Instructor,
    Admin,
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserType::Student => write!(f, "student"),
            UserType::Instructor => write!(f, "instructor"),
            UserType::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for UserType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(UserType::Student),
            "instructor" => Ok(UserType::Instructor),
            "admin" => Ok(UserType::Admin),
            _ => Err(ValidationError::InvalidUserType(s.to_string())),
        }
    }
}

/// Stored user record
#[derive(Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub user_id: String,
    /// Login email, unique across the directory
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub name: String,
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub enrolled_courses: Vec<String>,
}

impl User {
    /// Create a new active user with a fresh id
    pub fn new(
        email: String,
        password_hash: String,
        name: String,
        user_type: UserType,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: uuid::Uuid::new_v4().to_string(),
            email,
            password_hash,
            name,
            user_type,
            created_at,
            last_login: None,
            is_active: true,
            enrolled_courses: Vec::new(),
        }
    }

    /// View of this user safe to hand out
    pub fn info(&self) -> UserInfo {
        UserInfo::from(self)
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("name", &self.name)
            .field("user_type", &self.user_type)
            .field("created_at", &self.created_at)
            .field("last_login", &self.last_login)
            .field("is_active", &self.is_active)
            .field("enrolled_courses", &self.enrolled_courses)
            .finish()
    }
}

/// Login response with token
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// User information in responses, never carries the password hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub enrolled_courses: Vec<String>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            user_type: user.user_type,
            created_at: user.created_at,
            last_login: user.last_login,
            is_active: user.is_active,
            enrolled_courses: user.enrolled_courses.clone(),
        }
    }
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(user_type: UserType) -> User {
        User::new(
            "ana@example.com".to_string(),
            "salt$digest".to_string(),
            "Ana".to_string(),
            user_type,
            Utc::now(),
        )
    }

    #[test]
    fn test_user_type_parse() {
        assert_eq!("student".parse::<UserType>().unwrap(), UserType::Student);
        assert_eq!("Instructor".parse::<UserType>().unwrap(), UserType::Instructor);
        assert_eq!(" ADMIN ".parse::<UserType>().unwrap(), UserType::Admin);
        assert_eq!(
            "teacher".parse::<UserType>(),
            Err(ValidationError::InvalidUserType("teacher".to_string()))
        );
    }

    #[test]
    fn test_hash_never_leaks() {
        let user = user(UserType::Student);
        let debug = format!("{:?}", user);
        let json = serde_json::to_string(&user).unwrap();

        assert!(!debug.contains("salt$digest"));
        assert!(!json.contains("salt$digest"));
        assert!(!json.contains("password_hash"));
    }
}
