//! Password hashing, verification and strength policy
//!
//! New hashes use the configured [`HashScheme`]. Verification accepts both
//! bcrypt hashes and the legacy `salt$digest` format so records written by
//! older deployments keep working.

use crate::config::{HashScheme, PasswordConfig};
use crate::error::{Result, ValidationError};
use sha2::{Digest, Sha256};
use std::fmt;

/// Separator between salt and digest in the legacy format
pub const LEGACY_DELIMITER: char = '$';

const SALT_BYTES: usize = 16;

/// A single password strength rule, checked in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    MinLength(usize),
    Uppercase,
    Lowercase,
    Digit,
}

impl fmt::Display for PasswordRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordRule::MinLength(n) => {
                write!(f, "Password must be at least {} characters long", n)
            }
            PasswordRule::Uppercase => {
                write!(f, "Password must contain at least one uppercase letter")
            }
            PasswordRule::Lowercase => {
                write!(f, "Password must contain at least one lowercase letter")
            }
            PasswordRule::Digit => write!(f, "Password must contain at least one digit"),
        }
    }
}

/// Salts, hashes and verifies credentials
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    config: PasswordConfig,
}

impl PasswordHasher {
    pub fn new(config: PasswordConfig) -> Self {
        Self { config }
    }

    pub fn scheme(&self) -> HashScheme {
        self.config.scheme
    }

    /// Hash a password with a fresh random salt
    pub fn hash(&self, password: &str) -> Result<String> {
        match self.config.scheme {
            HashScheme::Bcrypt => Ok(bcrypt::hash(password, self.config.bcrypt_cost)?),
            HashScheme::SaltedSha256 => Ok(hash_legacy(password)),
        }
    }

    /// Check a plaintext attempt against a stored hash.
    ///
    /// Malformed stored hashes never match.
    pub fn verify(&self, password: &str, stored_hash: &str) -> bool {
        if is_bcrypt(stored_hash) {
            return match bcrypt::verify(password, stored_hash) {
                Ok(matched) => matched,
                Err(e) => {
                    tracing::warn!("Malformed bcrypt hash in user record: {}", e);
                    false
                }
            };
        }
        verify_legacy(password, stored_hash)
    }

    /// Whether a stored hash was produced by a scheme other than the configured one
    pub fn needs_rehash(&self, stored_hash: &str) -> bool {
        let stored_scheme = if is_bcrypt(stored_hash) {
            HashScheme::Bcrypt
        } else {
            HashScheme::SaltedSha256
        };
        stored_scheme != self.config.scheme
    }

    /// Apply the strength policy with this hasher's minimum length
    pub fn validate_strength(&self, password: &str) -> std::result::Result<(), ValidationError> {
        validate_password_strength_with(password, self.config.min_length)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(PasswordConfig::default())
    }
}

/// Reject passwords shorter than 8 characters or missing an uppercase
/// letter, a lowercase letter or a digit. The first failing rule wins.
pub fn validate_password_strength(password: &str) -> std::result::Result<(), ValidationError> {
    validate_password_strength_with(password, 8)
}

pub fn validate_password_strength_with(
    password: &str,
    min_length: usize,
) -> std::result::Result<(), ValidationError> {
    let rule = if password.chars().count() < min_length {
        Some(PasswordRule::MinLength(min_length))
    } else if !password.chars().any(|c| c.is_uppercase()) {
        Some(PasswordRule::Uppercase)
    } else if !password.chars().any(|c| c.is_lowercase()) {
        Some(PasswordRule::Lowercase)
    } else if !password.chars().any(|c| c.is_ascii_digit()) {
        Some(PasswordRule::Digit)
    } else {
        None
    };

    match rule {
        Some(rule) => Err(ValidationError::WeakPassword(rule)),
        None => Ok(()),
    }
}

fn is_bcrypt(stored_hash: &str) -> bool {
    stored_hash.starts_with("$2")
}

fn hash_legacy(password: &str) -> String {
    let salt = hex::encode(rand::random::<[u8; SALT_BYTES]>());
    let digest = legacy_digest(password, &salt);
    format!("{}{}{}", salt, LEGACY_DELIMITER, digest)
}

fn verify_legacy(password: &str, stored_hash: &str) -> bool {
    let mut parts = stored_hash.split(LEGACY_DELIMITER);
    let (Some(salt), Some(digest), None) = (parts.next(), parts.next(), parts.next()) else {
        tracing::warn!("Malformed password hash in user record, treating as mismatch");
        return false;
    };

    let computed = legacy_digest(password, salt);
    constant_time_eq(computed.as_bytes(), digest.as_bytes())
}

fn legacy_digest(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
