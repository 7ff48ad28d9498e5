//! Course catalog tests

use coursepad::catalog::{
    CourseCatalog, CourseCategory, CourseLevel, CourseModule, NewCourse,
};
use coursepad::config::CatalogConfig;
use coursepad::error::{Error, ValidationError};

fn new_course(id: &str, title: &str, description: &str) -> NewCourse {
    NewCourse {
        course_id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        instructor_id: "inst_001".to_string(),
        price: 99.99,
        ..NewCourse::default()
    }
}

const LONG_DESCRIPTION: &str =
    "A test description that is comfortably longer than the fifty character minimum.";

#[test]
fn test_create_course() {
    let catalog = CourseCatalog::default();
    let course = catalog
        .create_course(new_course("test_001", "Complete Test Course", LONG_DESCRIPTION))
        .expect("Course should be created");

    assert_eq!(course.course_id, "test_001");
    assert_eq!(course.price, 99.99);
    assert_eq!(course.category, CourseCategory::Programming);
    assert_eq!(course.created_at, course.updated_at);
}

#[test]
fn test_search_courses() {
    let catalog = CourseCatalog::default();
    catalog
        .create_course(new_course(
            "course1",
            "Advanced Python For Everyone",
            "Python course description with advanced and complete content inside.",
        ))
        .expect("Course should be created");

    let results = catalog.search_courses("Python");
    assert_eq!(results.len(), 1);
}

#[test]
fn test_search_preserves_creation_order() {
    let catalog = CourseCatalog::default();
    for id in ["c", "a", "b"] {
        catalog
            .create_course(new_course(id, "Shared Course Title", LONG_DESCRIPTION))
            .expect("Course should be created");
    }

    let ids: Vec<String> = catalog
        .search_courses("shared")
        .into_iter()
        .map(|c| c.course_id)
        .collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
}

#[test]
fn test_custom_limits() {
    let catalog = CourseCatalog::new(CatalogConfig {
        min_title_length: 1,
        max_title_length: 10,
        min_description_length: 0,
    });

    assert!(catalog.create_course(new_course("ok", "Short", "")).is_ok());
    let err = catalog
        .create_course(new_course("long", "Far too long a title", ""))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::InvalidCourse { field: "title", .. })
    ));
}

#[test]
fn test_level_and_category_kept() {
    let catalog = CourseCatalog::default();
    let mut new = new_course("design", "Typography Basics", LONG_DESCRIPTION);
    new.level = CourseLevel::Intermediate;
    new.category = CourseCategory::Design;

    let course = catalog.create_course(new).expect("Course should be created");
    assert_eq!(course.level, CourseLevel::Intermediate);
    assert_eq!(course.category, CourseCategory::Design);
}

#[test]
fn test_modules_and_instructor_listing() {
    let catalog = CourseCatalog::default();
    catalog
        .create_course(new_course("rs", "Rust From Scratch", LONG_DESCRIPTION))
        .expect("Course should be created");
    catalog
        .add_module(
            "rs",
            CourseModule {
                title: "Ownership".to_string(),
                lessons: vec!["Moves".to_string(), "Borrows".to_string()],
            },
        )
        .expect("Module should be added");

    let courses = catalog.courses_by_instructor("inst_001");
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].modules.len(), 1);
    assert!(catalog.courses_by_instructor("someone-else").is_empty());
    assert!(matches!(
        catalog.add_module(
            "missing",
            CourseModule {
                title: "X".to_string(),
                lessons: vec![]
            }
        ),
        Err(Error::CourseNotFound(_))
    ));
}

#[test]
fn test_summary_serializes_count() {
    let catalog = CourseCatalog::default();
    catalog
        .create_course(new_course("rs", "Rust From Scratch", LONG_DESCRIPTION))
        .expect("Course should be created");
    catalog.enroll_student("rs", "u1").expect("Enroll should succeed");
    catalog.enroll_student("rs", "u2").expect("Enroll should succeed");

    let summary = catalog.get_course("rs").expect("Course should exist").summary();
    let json = serde_json::to_value(&summary).expect("Failed to serialize");
    assert_eq!(json["students_count"], 2);
    assert_eq!(json["level"], "beginner");
    assert_eq!(json["category"], "programming");
    assert!(json.get("students_enrolled").is_none());
}
