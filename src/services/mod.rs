//! Application services layer - Use cases and business logic.
//!
//! Services own every check-then-mutate sequence against the store and run
//! each one under a single write guard.

mod auth_service;
pub mod container;
mod course_service;
mod enrollment_service;
mod student_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, AuthSession, Authenticator, Claims, TokenResponse};
pub use course_service::{CourseFilter, CourseManager, CourseService};
pub use enrollment_service::{EnrollmentFilter, EnrollmentManager, EnrollmentService};
pub use student_service::{StudentFilter, StudentManager, StudentService};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
#[cfg(any(test, feature = "test-utils"))]
pub use course_service::MockCourseService;
#[cfg(any(test, feature = "test-utils"))]
pub use enrollment_service::MockEnrollmentService;
#[cfg(any(test, feature = "test-utils"))]
pub use student_service::MockStudentService;
