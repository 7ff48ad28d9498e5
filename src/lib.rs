//! Coursepad - course catalog and user authentication backend
//!
//! All state is held in memory by explicitly constructed services; nothing
//! is persisted. Start from [`Platform`] or use [`auth::UserDirectory`] and
//! [`catalog::CourseCatalog`] on their own.

pub mod auth;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod platform;

pub use config::Config;
pub use error::{Error, Result};
pub use platform::Platform;
