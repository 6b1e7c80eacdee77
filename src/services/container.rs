//! Service Container - Centralized service access.
//!
//! Builds every service around one shared `Database` so they all see (and
//! lock) the same collections.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, CourseManager, CourseService, EnrollmentManager,
    EnrollmentService, StudentManager, StudentService,
};
use crate::config::Config;
use crate::infra::Database;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn students(&self) -> Arc<dyn StudentService>;

    fn courses(&self) -> Arc<dyn CourseService>;

    fn enrollments(&self) -> Arc<dyn EnrollmentService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    student_service: Arc<dyn StudentService>,
    course_service: Arc<dyn CourseService>,
    enrollment_service: Arc<dyn EnrollmentService>,
}

impl Services {
    /// Create a container from already-built services
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        student_service: Arc<dyn StudentService>,
        course_service: Arc<dyn CourseService>,
        enrollment_service: Arc<dyn EnrollmentService>,
    ) -> Self {
        Self {
            auth_service,
            student_service,
            course_service,
            enrollment_service,
        }
    }

    /// Create every service over the given database
    pub fn from_database(db: Arc<Database>, config: Config) -> Self {
        Self::new(
            Arc::new(Authenticator::new(db.clone(), config)),
            Arc::new(StudentManager::new(db.clone())),
            Arc::new(CourseManager::new(db.clone())),
            Arc::new(EnrollmentManager::new(db)),
        )
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn students(&self) -> Arc<dyn StudentService> {
        self.student_service.clone()
    }

    fn courses(&self) -> Arc<dyn CourseService> {
        self.course_service.clone()
    }

    fn enrollments(&self) -> Arc<dyn EnrollmentService> {
        self.enrollment_service.clone()
    }
}
