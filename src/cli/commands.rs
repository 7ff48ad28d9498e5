//! CLI command implementations

use anyhow::Result;
use dialoguer::Password;
use serde::Serialize;
use std::fs;

use crate::auth::{PasswordHasher, UserInfo, UserType};
use crate::catalog::{CourseSummary, NewCourse};
use crate::cli::{error, info, print_course_table, print_user_table, success, warn, OutputFormat};
use crate::config::{self, loader::CONFIG_FILENAME, Config, HashScheme};
use crate::platform::Platform;

/// Initialize a new coursepad.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new(CONFIG_FILENAME);

    if config_path.exists() {
        warn("coursepad.toml already exists");
        return Ok(());
    }

    let content = config::loader::default_config_content();
    fs::write(config_path, content)?;

    success("Created coursepad.toml");
    info("Edit the configuration file and run 'coursepad demo' to try it out");

    Ok(())
}

/// Hash a password and print the stored form
pub async fn hash_password(password: Option<String>, legacy: bool) -> Result<()> {
    let config = load_config()?;
    let mut password_config = config.auth.password.clone();
    if legacy {
        password_config.scheme = HashScheme::SaltedSha256;
    }

    let password = password_or_prompt(password)?;
    let hasher = PasswordHasher::new(password_config);
    if let Err(e) = hasher.validate_strength(&password) {
        warn(&e.to_string());
    }

    println!("{}", hasher.hash(&password)?);
    Ok(())
}

/// Verify a password against a stored hash
pub async fn verify_password(hash: &str, password: Option<String>) -> Result<()> {
    let config = load_config()?;
    let password = password_or_prompt(password)?;
    let hasher = PasswordHasher::new(config.auth.password);

    if hasher.verify(&password, hash) {
        success("Password matches");
        if hasher.needs_rehash(hash) {
            info(&format!("Hash should be upgraded to {}", hasher.scheme()));
        }
        Ok(())
    } else {
        error("Password does not match");
        anyhow::bail!("verification failed")
    }
}

/// Check a password against the strength policy
pub async fn check_password(password: Option<String>) -> Result<()> {
    let config = load_config()?;
    let password = password_or_prompt(password)?;
    let hasher = PasswordHasher::new(config.auth.password);

    match hasher.validate_strength(&password) {
        Ok(()) => {
            success("Password meets the strength policy");
            Ok(())
        }
        Err(e) => {
            error(&e.to_string());
            Err(e.into())
        }
    }
}

#[derive(Serialize)]
struct DemoReport {
    users: Vec<UserInfo>,
    courses: Vec<CourseSummary>,
}

/// Walk through registration, login, enrollment and logout in memory
pub async fn demo(format: OutputFormat) -> Result<()> {
    let config = load_config()?;
    let platform = Platform::from_config(&config)?;
    let sweeper = platform.spawn_sweeper(&config);

    let instructor = platform.register(
        "tess@example.com",
        "Teach1ngRocks",
        "Tess",
        UserType::Instructor,
    )?;
    info(&format!("Registered instructor {}", instructor.user_id));
    let student = platform.register("ana@example.com", "Passw0rd", "Ana", UserType::Student)?;
    info(&format!("Registered student {}", student.user_id));

    if let Err(e) = platform.register("ana@example.com", "Passw0rd", "Ana", UserType::Student) {
        info(&format!("Duplicate registration rejected: {}", e));
    }
    if let Err(e) = platform.login("ana@example.com", "wrong-password") {
        info(&format!("Bad login rejected: {}", e));
    }

    let teacher_session = platform.login("tess@example.com", "Teach1ngRocks")?;
    platform.create_course(
        &teacher_session.token,
        NewCourse {
            course_id: "rust-101".to_string(),
            title: "Rust From Scratch".to_string(),
            description: "Ownership, borrowing, traits and error handling with hands-on exercises."
                .to_string(),
            price: 49.99,
            ..NewCourse::default()
        },
    )?;

    let session = platform.login("ana@example.com", "Passw0rd")?;
    success(&format!("Logged in as {}", session.user.name));

    for course in platform.search_courses("rust") {
        platform.enroll(&session.token, &course.course_id)?;
        success(&format!("Enrolled in {}", course.title));
    }

    if let Some(user_id) = platform.validate_session(&session.token) {
        info(&format!("Session resolves to {}", user_id));
    }
    if platform.revoke_session(&session.token) {
        success("Logged out");
    }
    if platform.validate_session(&session.token).is_none() {
        info("Session no longer valid");
    }

    let report = DemoReport {
        users: platform.users().list_users(),
        courses: platform
            .courses()
            .list_courses()
            .iter()
            .map(|c| c.summary())
            .collect(),
    };

    match format {
        OutputFormat::Table => {
            print_user_table(&report.users);
            print_course_table(&report.courses);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&report)?;
            println!("{}", yaml);
        }
    }

    if let Some(handle) = sweeper {
        handle.abort();
    }
    Ok(())
}

// Helper functions

fn load_config() -> Result<Config> {
    config::load_config_or_default().map_err(|e| anyhow::anyhow!("{}", e))
}

fn password_or_prompt(password: Option<String>) -> Result<String> {
    match password {
        Some(password) => Ok(password),
        None => Ok(Password::new().with_prompt("Password").interact()?),
    }
}
