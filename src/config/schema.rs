//! Configuration schema definitions

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Session and credential settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// How long a session token stays valid after login
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,

    /// Interval for the background expired-session sweep, 0 disables it.
    /// Expired sessions are always evicted lazily on access regardless.
    #[serde(default)]
    pub sweep_interval_secs: u64,

    #[serde(default)]
    pub password: PasswordConfig,
}

fn default_session_ttl_secs() -> u64 {
    24 * 60 * 60
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_secs: default_session_ttl_secs(),
            sweep_interval_secs: 0,
            password: PasswordConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Session lifetime, rejecting values chrono can't represent
    pub fn session_ttl(&self) -> Result<chrono::Duration> {
        i64::try_from(self.session_ttl_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .ok_or_else(|| {
                Error::Config(format!(
                    "session_ttl_secs {} is out of range",
                    self.session_ttl_secs
                ))
            })
    }

    pub fn sweep_interval(&self) -> Option<std::time::Duration> {
        (self.sweep_interval_secs > 0)
            .then(|| std::time::Duration::from_secs(self.sweep_interval_secs))
    }
}

/// Password hashing and strength policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordConfig {
    #[serde(default)]
    pub scheme: HashScheme,

    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    #[serde(default = "default_min_length")]
    pub min_length: usize,
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

fn default_min_length() -> usize {
    8
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            scheme: HashScheme::default(),
            bcrypt_cost: default_bcrypt_cost(),
            min_length: default_min_length(),
        }
    }
}

/// Algorithm used for newly hashed passwords
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum HashScheme {
    #[default]
    Bcrypt,
    /// Legacy `salt$sha256(password || salt)` format
    SaltedSha256,
}

impl std::fmt::Display for HashScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashScheme::Bcrypt => write!(f, "bcrypt"),
            HashScheme::SaltedSha256 => write!(f, "salted-sha256"),
        }
    }
}

/// Field limits for course creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_min_title_length")]
    pub min_title_length: usize,

    #[serde(default = "default_max_title_length")]
    pub max_title_length: usize,

    #[serde(default = "default_min_description_length")]
    pub min_description_length: usize,
}

fn default_min_title_length() -> usize {
    5
}

fn default_max_title_length() -> usize {
    200
}

fn default_min_description_length() -> usize {
    50
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            min_title_length: default_min_title_length(),
            max_title_length: default_max_title_length(),
            min_description_length: default_min_description_length(),
        }
    }
}
