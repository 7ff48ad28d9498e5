//! User directory: registration, login and account state

use crate::auth::clock::{Clock, SystemClock};
use crate::auth::models::{LoginResponse, User, UserInfo, UserType};
use crate::auth::password::PasswordHasher;
use crate::auth::session::{token_prefix, SessionStore};
use crate::config::AuthConfig;
use crate::error::{Error, Result, ValidationError};
use parking_lot::RwLock;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("Invalid regex pattern - this is a bug in the codebase")
});

/// Check an email against the local@domain.tld shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

#[derive(Default)]
struct DirectoryState {
    users: HashMap<String, User>,
    /// email -> user_id
    email_index: HashMap<String, String>,
}

/// Owns every user record and orchestrates registration and login
pub struct UserDirectory {
    state: RwLock<DirectoryState>,
    hasher: PasswordHasher,
    sessions: SessionStore,
    clock: Arc<dyn Clock>,
    /// Verified against on unknown-email logins so both failure paths hash once
    dummy_hash: String,
}

impl UserDirectory {
    pub fn new(hasher: PasswordHasher, sessions: SessionStore) -> Result<Self> {
        Self::with_clock(hasher, sessions, Arc::new(SystemClock))
    }

    pub fn with_clock(
        hasher: PasswordHasher,
        sessions: SessionStore,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let dummy_hash = hasher.hash("Dummy-passw0rd-never-matches")?;
        Ok(Self {
            state: RwLock::new(DirectoryState::default()),
            hasher,
            sessions,
            clock,
            dummy_hash,
        })
    }

    /// Build a directory and its session store from configuration
    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        Self::from_config_with_clock(config, Arc::new(SystemClock))
    }

    pub fn from_config_with_clock(config: &AuthConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let sessions = SessionStore::with_clock(config.session_ttl()?, Arc::clone(&clock));
        let hasher = PasswordHasher::new(config.password.clone());
        Self::with_clock(hasher, sessions, clock)
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    /// Register a new user.
    ///
    /// Checks run in a fixed order: email syntax, email uniqueness, password
    /// strength. The uniqueness check is repeated under the write lock so two
    /// concurrent registrations of one email can't both succeed.
    pub fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        user_type: UserType,
    ) -> Result<User> {
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail(email.to_string()).into());
        }
        if self.state.read().email_index.contains_key(email) {
            return Err(ValidationError::EmailTaken(email.to_string()).into());
        }
        self.hasher.validate_strength(password)?;

        let password_hash = self.hasher.hash(password)?;
        let user = User::new(
            email.to_string(),
            password_hash,
            name.to_string(),
            user_type,
            self.clock.now(),
        );

        let mut state = self.state.write();
        if state.email_index.contains_key(email) {
            return Err(ValidationError::EmailTaken(email.to_string()).into());
        }
        state
            .email_index
            .insert(user.email.clone(), user.user_id.clone());
        state.users.insert(user.user_id.clone(), user.clone());
        drop(state);

        tracing::info!("Registered {} user {}", user.user_type, user.user_id);
        Ok(user)
    }

    /// Authenticate and open a session.
    ///
    /// Unknown email, wrong password and inactive account all fail with the
    /// same [`Error::Authentication`].
    pub fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let candidate = {
            let state = self.state.read();
            state
                .email_index
                .get(email)
                .and_then(|id| state.users.get(id))
                .map(|user| (user.user_id.clone(), user.password_hash.clone(), user.is_active))
        };

        let Some((user_id, password_hash, is_active)) = candidate else {
            self.hasher.verify(password, &self.dummy_hash);
            tracing::info!("Login failed: unknown account");
            return Err(Error::Authentication);
        };

        if !self.hasher.verify(password, &password_hash) {
            tracing::info!("Login failed for user {}: bad credentials", user_id);
            return Err(Error::Authentication);
        }
        if !is_active {
            tracing::info!("Login refused for inactive user {}", user_id);
            return Err(Error::Authentication);
        }

        let (info, token) = self.open_session(&user_id)?;

        tracing::info!("User {} logged in (session {})", user_id, token_prefix(&token));
        Ok(LoginResponse { token, user: info })
    }

    /// Re-check the account and issue a session under the state write lock.
    ///
    /// `deactivate` holds the same lock while it revokes, so a session is
    /// never issued to an account that is already disabled.
    fn open_session(&self, user_id: &str) -> Result<(UserInfo, String)> {
        let mut state = self.state.write();
        let user = state.users.get_mut(user_id).ok_or(Error::Authentication)?;
        if !user.is_active {
            tracing::info!("Login refused for user {} deactivated mid-login", user_id);
            return Err(Error::Authentication);
        }
        user.last_login = Some(self.clock.now());
        let token = self.sessions.create(user_id);
        Ok((UserInfo::from(&*user), token))
    }

    /// Resolve a session token to its user id
    pub fn validate_session(&self, token: &str) -> Option<String> {
        self.sessions.validate(token)
    }

    /// Revoke a session token. Returns whether it existed.
    pub fn revoke_session(&self, token: &str) -> bool {
        self.sessions.revoke(token)
    }

    pub fn logout(&self, token: &str) -> bool {
        self.revoke_session(token)
    }

    pub fn get_user(&self, user_id: &str) -> Option<User> {
        self.state.read().users.get(user_id).cloned()
    }

    pub fn find_by_email(&self, email: &str) -> Option<User> {
        let state = self.state.read();
        state
            .email_index
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned()
    }

    /// Resolve a session token straight to its user
    pub fn current_user(&self, token: &str) -> Option<User> {
        self.validate_session(token)
            .and_then(|user_id| self.get_user(&user_id))
    }

    /// All users, oldest first
    pub fn list_users(&self) -> Vec<UserInfo> {
        let state = self.state.read();
        let mut users: Vec<UserInfo> = state.users.values().map(UserInfo::from).collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        users
    }

    pub fn user_count(&self) -> usize {
        self.state.read().users.len()
    }

    /// Disable an account and drop all of its sessions
    pub fn deactivate(&self, user_id: &str) -> Result<()> {
        let mut state = self.state.write();
        set_active(&mut state, user_id, false)?;
        let revoked = self.sessions.revoke_all_for_user(user_id);
        drop(state);

        tracing::info!("Deactivated user {} ({} sessions revoked)", user_id, revoked);
        Ok(())
    }

    pub fn activate(&self, user_id: &str) -> Result<()> {
        set_active(&mut self.state.write(), user_id, true)?;
        tracing::info!("Activated user {}", user_id);
        Ok(())
    }

    /// Record a course enrollment. Re-enrolling is a no-op.
    pub fn enroll(&self, user_id: &str, course_id: &str) -> Result<()> {
        let mut state = self.state.write();
        let user = state
            .users
            .get_mut(user_id)
            .ok_or_else(|| Error::UserNotFound(user_id.to_string()))?;
        if !user.enrolled_courses.iter().any(|c| c == course_id) {
            user.enrolled_courses.push(course_id.to_string());
        }
        Ok(())
    }
}

fn set_active(state: &mut DirectoryState, user_id: &str, active: bool) -> Result<()> {
    let user = state
        .users
        .get_mut(user_id)
        .ok_or_else(|| Error::UserNotFound(user_id.to_string()))?;
    user.is_active = active;
    Ok(())
}
