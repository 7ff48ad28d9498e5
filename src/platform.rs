//! Composition root: one user directory plus one course catalog

use crate::auth::{Clock, LoginResponse, SystemClock, User, UserDirectory, UserType};
use crate::catalog::{Course, CourseCatalog, NewCourse};
use crate::config::Config;
use crate::error::{Error, Result};
use std::sync::Arc;

pub struct Platform {
    users: UserDirectory,
    courses: CourseCatalog,
}

impl Platform {
    pub fn new(users: UserDirectory, courses: CourseCatalog) -> Self {
        Self { users, courses }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::from_config_with_clock(config, Arc::new(SystemClock))
    }

    pub fn from_config_with_clock(config: &Config, clock: Arc<dyn Clock>) -> Result<Self> {
        Ok(Self {
            users: UserDirectory::from_config_with_clock(&config.auth, clock)?,
            courses: CourseCatalog::new(config.catalog.clone()),
        })
    }

    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    pub fn courses(&self) -> &CourseCatalog {
        &self.courses
    }

    pub fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        user_type: UserType,
    ) -> Result<User> {
        self.users.register(email, password, name, user_type)
    }

    pub fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        self.users.login(email, password)
    }

    pub fn validate_session(&self, token: &str) -> Option<String> {
        self.users.validate_session(token)
    }

    pub fn revoke_session(&self, token: &str) -> bool {
        self.users.revoke_session(token)
    }

    /// Publish a course attributed to the session's user
    pub fn create_course(&self, token: &str, mut new: NewCourse) -> Result<Course> {
        new.instructor_id = self.users.validate_session(token).ok_or(Error::Authentication)?;
        self.courses.create_course(new)
    }

    pub fn search_courses(&self, keyword: &str) -> Vec<Course> {
        self.courses.search_courses(keyword)
    }

    /// Enroll the session's user in a course, recording it on both sides
    pub fn enroll(&self, token: &str, course_id: &str) -> Result<()> {
        let user_id = self.users.validate_session(token).ok_or(Error::Authentication)?;
        self.courses.enroll_student(course_id, &user_id)?;
        self.users.enroll(&user_id, course_id)?;
        tracing::info!("User {} enrolled in {}", user_id, course_id);
        Ok(())
    }

    /// Start the background session sweep if the config asks for one
    pub fn spawn_sweeper(&self, config: &Config) -> Option<tokio::task::JoinHandle<()>> {
        config
            .auth
            .sweep_interval()
            .map(|every| self.users.sessions().spawn_sweeper(every))
    }
}
