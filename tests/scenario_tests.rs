//! End-to-end platform scenarios

use coursepad::auth::UserType;
use coursepad::catalog::NewCourse;
use coursepad::config::{Config, HashScheme};
use coursepad::Platform;

fn platform() -> Platform {
    let mut config = Config::default();
    config.auth.password.scheme = HashScheme::Bcrypt;
    config.auth.password.bcrypt_cost = 4;
    Platform::from_config(&config).expect("Failed to build platform")
}

#[test]
fn test_register_login_validate_revoke() {
    let platform = platform();

    let user = platform
        .register("a@b.com", "Passw0rd", "Ana", UserType::Student)
        .expect("Registration should succeed");
    let response = platform
        .login("a@b.com", "Passw0rd")
        .expect("Login should succeed");

    assert_eq!(response.user.user_id, user.user_id);
    assert_eq!(
        platform.validate_session(&response.token),
        Some(user.user_id.clone())
    );
    assert!(platform.revoke_session(&response.token));
    assert_eq!(platform.validate_session(&response.token), None);
}

#[test]
fn test_each_login_opens_its_own_session() {
    let platform = platform();
    platform
        .register("a@b.com", "Passw0rd", "Ana", UserType::Student)
        .expect("Registration should succeed");

    let first = platform.login("a@b.com", "Passw0rd").expect("Login should succeed");
    let second = platform.login("a@b.com", "Passw0rd").expect("Login should succeed");
    assert_ne!(first.token, second.token);

    assert!(platform.revoke_session(&first.token));
    assert!(platform.validate_session(&second.token).is_some());
}

#[test]
fn test_publish_search_enroll() {
    let platform = platform();
    platform
        .register("tess@b.com", "Teach1ngRocks", "Tess", UserType::Instructor)
        .expect("Registration should succeed");
    let teacher = platform
        .login("tess@b.com", "Teach1ngRocks")
        .expect("Login should succeed");

    platform
        .create_course(
            &teacher.token,
            NewCourse {
                course_id: "py-adv".to_string(),
                title: "Advanced Python For Everyone".to_string(),
                description: "Decorators, generators, async and packaging with complete projects."
                    .to_string(),
                price: 49.99,
                ..NewCourse::default()
            },
        )
        .expect("Course should be created");

    let results = platform.search_courses("Python");
    assert_eq!(results.len(), 1);

    platform
        .register("ana@b.com", "Passw0rd", "Ana", UserType::Student)
        .expect("Registration should succeed");
    let student = platform
        .login("ana@b.com", "Passw0rd")
        .expect("Login should succeed");
    platform
        .enroll(&student.token, &results[0].course_id)
        .expect("Enrollment should succeed");

    let summary = platform
        .courses()
        .get_course("py-adv")
        .expect("Course should exist")
        .summary();
    assert_eq!(summary.students_count, 1);
    assert_eq!(
        platform
            .users()
            .find_by_email("ana@b.com")
            .expect("User should exist")
            .enrolled_courses,
        vec!["py-adv".to_string()]
    );
}

#[test]
fn test_revoked_session_cannot_enroll() {
    let platform = platform();
    platform
        .register("ana@b.com", "Passw0rd", "Ana", UserType::Student)
        .expect("Registration should succeed");
    let session = platform
        .login("ana@b.com", "Passw0rd")
        .expect("Login should succeed");
    platform.revoke_session(&session.token);

    let err = platform.enroll(&session.token, "anything").unwrap_err();
    assert!(err.is_authentication());
}
