//! Configuration management for Coursepad

pub mod loader;
mod schema;

pub use loader::{load_config, load_config_from_path, load_config_or_default, save_config};
pub use schema::*;
