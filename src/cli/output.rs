//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::auth::{UserInfo, UserType};
use crate::catalog::CourseSummary;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Print a table of users
pub fn print_user_table(users: &[UserInfo]) {
    if users.is_empty() {
        info("No users registered");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Email").fg(Color::Cyan),
            Cell::new("Name").fg(Color::Cyan),
            Cell::new("Type").fg(Color::Cyan),
            Cell::new("Active").fg(Color::Cyan),
            Cell::new("Courses").fg(Color::Cyan),
            Cell::new("Last login").fg(Color::Cyan),
        ]);

    for user in users {
        let type_color = match user.user_type {
            UserType::Admin => Color::Magenta,
            UserType::Instructor => Color::Yellow,
            UserType::Student => Color::Green,
        };

        let last_login = user
            .last_login
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        table.add_row(vec![
            Cell::new(&user.email),
            Cell::new(&user.name),
            Cell::new(user.user_type.to_string()).fg(type_color),
            Cell::new(if user.is_active { "yes" } else { "no" }),
            Cell::new(user.enrolled_courses.join(", ")),
            Cell::new(last_login),
        ]);
    }

    println!("{table}");
}

/// Print a table of courses
pub fn print_course_table(courses: &[CourseSummary]) {
    if courses.is_empty() {
        info("No courses found");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").fg(Color::Cyan),
            Cell::new("Title").fg(Color::Cyan),
            Cell::new("Level").fg(Color::Cyan),
            Cell::new("Category").fg(Color::Cyan),
            Cell::new("Price").fg(Color::Cyan),
            Cell::new("Students").fg(Color::Cyan),
        ]);

    for course in courses {
        table.add_row(vec![
            Cell::new(&course.course_id),
            Cell::new(&course.title),
            Cell::new(course.level.to_string()),
            Cell::new(course.category.to_string()),
            Cell::new(format!("{:.2}", course.price)),
            Cell::new(course.students_count.to_string()),
        ]);
    }

    println!("{table}");
}
