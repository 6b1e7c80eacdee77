//! Service-level tests over one shared database.
//!
//! Services are built through the container, so they see the same store
//! exactly as the HTTP layer does.

use std::sync::Arc;

use course_registry::config::Config;
use course_registry::domain::{NewCourse, NewStudent, UpdateEnrollment};
use course_registry::errors::AppError;
use course_registry::infra::Database;
use course_registry::services::{
    EnrollmentFilter, ServiceContainer, Services, StudentFilter,
};
use course_registry::EnrollmentStatus;

fn services() -> (Services, Arc<Database>) {
    let db = Arc::new(Database::new());
    let config = Config::with_jwt_secret("test-secret-key-for-testing-only-32chars").unwrap();
    (Services::from_database(db.clone(), config), db)
}

fn new_student(email: &str, roll: &str) -> NewStudent {
    NewStudent {
        name: "Test Student".to_string(),
        email: email.to_string(),
        roll_number: roll.to_string(),
        year: 1,
        department: "Mathematics".to_string(),
        password: "password123".to_string(),
    }
}

fn new_course(code: &str, capacity: u32) -> NewCourse {
    NewCourse {
        name: format!("Course {}", code),
        course_code: code.to_string(),
        description: "Test course".to_string(),
        credits: 3,
        instructor: "Dr. Test".to_string(),
        max_capacity: capacity,
    }
}

#[tokio::test]
async fn test_registered_student_visible_to_student_service() {
    let (services, _) = services();

    let session = services
        .auth()
        .register(new_student("a@x.com", "R-1"))
        .await
        .unwrap();

    let student = services.students().get_student(session.student.id).await.unwrap();
    assert_eq!(student.email, "a@x.com");

    // The students API words the duplicate differently from registration
    let err = services
        .students()
        .create_student(new_student("a@x.com", "R-2"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(ref m) if m == "Email already exists"));

    let claims = services
        .auth()
        .verify_token(&session.token.access_token)
        .unwrap();
    assert_eq!(claims.sub, student.id);
}

#[tokio::test]
async fn test_login_rejects_unknown_email_and_bad_password() {
    let (services, _) = services();
    services
        .auth()
        .register(new_student("a@x.com", "R-1"))
        .await
        .unwrap();

    let err = services
        .auth()
        .login("nobody@x.com".to_string(), "password123".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));

    let err = services
        .auth()
        .login("a@x.com".to_string(), "wrong".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));

    let session = services
        .auth()
        .login("a@x.com".to_string(), "password123".to_string())
        .await
        .unwrap();
    assert_eq!(session.token.token_type, "Bearer");
}

#[tokio::test]
async fn test_deletes_cascade_across_services() {
    let (services, db) = services();
    let a = services
        .students()
        .create_student(new_student("a@x.com", "R-1"))
        .await
        .unwrap();
    let b = services
        .students()
        .create_student(new_student("b@x.com", "R-2"))
        .await
        .unwrap();
    let algebra = services.courses().create_course(new_course("MA101", 2)).await.unwrap();
    let geometry = services.courses().create_course(new_course("MA102", 2)).await.unwrap();

    services.enrollments().enroll(a.id, algebra.id).await.unwrap();
    services.enrollments().enroll(b.id, algebra.id).await.unwrap();
    let finished = services.enrollments().enroll(a.id, geometry.id).await.unwrap();
    services
        .enrollments()
        .update_enrollment(
            finished.id,
            UpdateEnrollment {
                status: Some(EnrollmentStatus::Completed),
                grade: Some("B".to_string()),
            },
        )
        .await
        .unwrap();

    services.students().delete_student(a.id).await.unwrap();

    let algebra = services.courses().get_course(algebra.id).await.unwrap();
    assert_eq!(algebra.current_enrollment(), 1);
    let remaining = services
        .enrollments()
        .list_enrollments(EnrollmentFilter::default())
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].student_id, b.id);

    services.courses().delete_course(algebra.id).await.unwrap();
    assert_eq!(db.stats().await.enrollments, 0);

    let students = services
        .students()
        .list_students(StudentFilter::default())
        .await
        .unwrap();
    assert_eq!(students.len(), 1);
}
