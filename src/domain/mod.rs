//! Domain layer - Core business entities and logic
//!
//! Students, courses and enrollments, plus the password value object.
//! Entities own their mutation rules; nothing outside this module writes
//! their fields around those methods.

pub mod course;
pub mod enrollment;
pub mod password;
pub mod student;

pub use course::{Course, NewCourse, UpdateCourse};
pub use enrollment::{Enrollment, EnrollmentStatus, UpdateEnrollment};
pub use password::Password;
pub use student::{NewStudent, Student, StudentResponse, UpdateStudent};

/// The value when present and non-empty (partial updates skip the rest).
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
