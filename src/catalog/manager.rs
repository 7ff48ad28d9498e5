//! In-memory course storage and validation

use super::{Course, CourseModule, NewCourse};
use crate::config::CatalogConfig;
use crate::error::{Error, Result, ValidationError};
use parking_lot::RwLock;

/// Holds every course, in creation order
pub struct CourseCatalog {
    courses: RwLock<Vec<Course>>,
    limits: CatalogConfig,
}

impl CourseCatalog {
    pub fn new(limits: CatalogConfig) -> Self {
        Self {
            courses: RwLock::new(Vec::new()),
            limits,
        }
    }

    /// Validate and store a new course
    pub fn create_course(&self, new: NewCourse) -> Result<Course> {
        self.validate(&new)?;

        let now = chrono::Utc::now();
        let course = Course {
            course_id: new.course_id,
            title: new.title,
            description: new.description,
            instructor_id: new.instructor_id,
            price: new.price,
            level: new.level,
            category: new.category,
            created_at: now,
            updated_at: now,
            modules: Vec::new(),
            students_enrolled: Vec::new(),
            rating: 0.0,
            total_reviews: 0,
        };

        let mut courses = self.courses.write();
        if courses.iter().any(|c| c.course_id == course.course_id) {
            return Err(ValidationError::DuplicateCourse(course.course_id).into());
        }
        courses.push(course.clone());
        drop(courses);

        tracing::info!("Created course {} ({})", course.course_id, course.title);
        Ok(course)
    }

    fn validate(&self, new: &NewCourse) -> Result<()> {
        let invalid = |field: &'static str, reason: String| -> Error {
            ValidationError::InvalidCourse { field, reason }.into()
        };

        if new.course_id.trim().is_empty() {
            return Err(invalid("course_id", "must not be empty".to_string()));
        }
        if self.get_course(&new.course_id).is_some() {
            return Err(ValidationError::DuplicateCourse(new.course_id.clone()).into());
        }

        let title_len = new.title.trim().chars().count();
        if title_len < self.limits.min_title_length || title_len > self.limits.max_title_length {
            return Err(invalid(
                "title",
                format!(
                    "must be between {} and {} characters",
                    self.limits.min_title_length, self.limits.max_title_length
                ),
            ));
        }

        if new.description.trim().chars().count() < self.limits.min_description_length {
            return Err(invalid(
                "description",
                format!(
                    "must be at least {} characters",
                    self.limits.min_description_length
                ),
            ));
        }

        if new.instructor_id.trim().is_empty() {
            return Err(invalid("instructor_id", "must not be empty".to_string()));
        }

        if !new.price.is_finite() || new.price < 0.0 {
            return Err(invalid("price", "must be zero or positive".to_string()));
        }

        Ok(())
    }

    pub fn get_course(&self, course_id: &str) -> Option<Course> {
        self.courses
            .read()
            .iter()
            .find(|c| c.course_id == course_id)
            .cloned()
    }

    /// All courses, in creation order
    pub fn list_courses(&self) -> Vec<Course> {
        self.courses.read().clone()
    }

    /// Courses whose title or description contains `keyword`, ignoring case
    pub fn search_courses(&self, keyword: &str) -> Vec<Course> {
        self.courses
            .read()
            .iter()
            .filter(|c| c.matches(keyword))
            .cloned()
            .collect()
    }

    pub fn courses_by_instructor(&self, instructor_id: &str) -> Vec<Course> {
        self.courses
            .read()
            .iter()
            .filter(|c| c.instructor_id == instructor_id)
            .cloned()
            .collect()
    }

    /// Add a student to a course. Re-enrolling is a no-op.
    pub fn enroll_student(&self, course_id: &str, user_id: &str) -> Result<()> {
        self.update(course_id, |course| {
            if course.students_enrolled.iter().any(|s| s == user_id) {
                return false;
            }
            course.students_enrolled.push(user_id.to_string());
            true
        })
    }

    pub fn add_module(&self, course_id: &str, module: CourseModule) -> Result<()> {
        self.update(course_id, |course| {
            course.modules.push(module);
            true
        })
    }

    /// Fold a 1-5 star review into the running average
    pub fn add_review(&self, course_id: &str, stars: u8) -> Result<()> {
        if !(1..=5).contains(&stars) {
            return Err(ValidationError::InvalidCourse {
                field: "rating",
                reason: "must be between 1 and 5".to_string(),
            }
            .into());
        }
        self.update(course_id, |course| {
            let total = course.rating * f64::from(course.total_reviews) + f64::from(stars);
            course.total_reviews += 1;
            course.rating = total / f64::from(course.total_reviews);
            true
        })
    }

    pub fn len(&self) -> usize {
        self.courses.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.read().is_empty()
    }

    /// Apply `f` to a course, bumping `updated_at` when it reports a change
    fn update<F>(&self, course_id: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut Course) -> bool,
    {
        let mut courses = self.courses.write();
        let course = courses
            .iter_mut()
            .find(|c| c.course_id == course_id)
            .ok_or_else(|| Error::CourseNotFound(course_id.to_string()))?;
        if f(course) {
            course.updated_at = chrono::Utc::now();
        }
        Ok(())
    }
}

impl Default for CourseCatalog {
    fn default() -> Self {
        Self::new(CatalogConfig::default())
    }
}
