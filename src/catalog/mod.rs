//! Course catalog

mod manager;

pub use manager::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Difficulty level of a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseLevel::Beginner => write!(f, "beginner"),
            CourseLevel::Intermediate => write!(f, "intermediate"),
            CourseLevel::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for CourseLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(CourseLevel::Beginner),
            "intermediate" => Ok(CourseLevel::Intermediate),
            "advanced" => Ok(CourseLevel::Advanced),
            _ => Err(ValidationError::InvalidCourse {
                field: "level",
                reason: format!("unknown level '{}'", s),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CourseCategory {
    #[default]
    Programming,
    Design,
    Business,
    Marketing,
    PersonalDevelopment,
    Languages,
    Science,
}

impl CourseCategory {
    pub const ALL: [CourseCategory; 7] = [
        CourseCategory::Programming,
        CourseCategory::Design,
        CourseCategory::Business,
        CourseCategory::Marketing,
        CourseCategory::PersonalDevelopment,
        CourseCategory::Languages,
        CourseCategory::Science,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CourseCategory::Programming => "programming",
            CourseCategory::Design => "design",
            CourseCategory::Business => "business",
            CourseCategory::Marketing => "marketing",
            CourseCategory::PersonalDevelopment => "personal-development",
            CourseCategory::Languages => "languages",
            CourseCategory::Science => "science",
        }
    }
}

impl fmt::Display for CourseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourseCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        CourseCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| ValidationError::InvalidCourse {
                field: "category",
                reason: format!("unknown category '{}'", s),
            })
    }
}

/// A section of course content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseModule {
    pub title: String,
    pub lessons: Vec<String>,
}

/// Represents a course in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub course_id: String,
    pub title: String,
    pub description: String,
    pub instructor_id: String,
    pub price: f64,
    pub level: CourseLevel,
    pub category: CourseCategory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub modules: Vec<CourseModule>,
    pub students_enrolled: Vec<String>,
    pub rating: f64,
    pub total_reviews: u32,
}

impl Course {
    /// Serializable view with the enrolled list collapsed to a count
    pub fn summary(&self) -> CourseSummary {
        CourseSummary {
            course_id: self.course_id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            instructor_id: self.instructor_id.clone(),
            price: self.price,
            level: self.level,
            category: self.category,
            created_at: self.created_at,
            updated_at: self.updated_at,
            modules: self.modules.clone(),
            students_count: self.students_enrolled.len(),
            rating: self.rating,
            total_reviews: self.total_reviews,
        }
    }

    /// Case-insensitive match against title or description
    pub fn matches(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.title.to_lowercase().contains(&keyword)
            || self.description.to_lowercase().contains(&keyword)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSummary {
    pub course_id: String,
    pub title: String,
    pub description: String,
    pub instructor_id: String,
    pub price: f64,
    pub level: CourseLevel,
    pub category: CourseCategory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub modules: Vec<CourseModule>,
    pub students_count: usize,
    pub rating: f64,
    pub total_reviews: u32,
}

/// Fields supplied when creating a course
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCourse {
    pub course_id: String,
    pub title: String,
    pub description: String,
    pub instructor_id: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub level: CourseLevel,
    #[serde(default)]
    pub category: CourseCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!(
            "personal-development".parse::<CourseCategory>().unwrap(),
            CourseCategory::PersonalDevelopment
        );
        assert_eq!("Science".parse::<CourseCategory>().unwrap(), CourseCategory::Science);
        assert!("cooking".parse::<CourseCategory>().is_err());
    }

    #[test]
    fn test_level_parse() {
        assert_eq!("ADVANCED".parse::<CourseLevel>().unwrap(), CourseLevel::Advanced);
        assert!("expert".parse::<CourseLevel>().is_err());
    }

    #[test]
    fn test_category_serde_matches_display() {
        for category in CourseCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category));
        }
    }
}
