//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AuthService, CourseService, EnrollmentService, ServiceContainer, Services, StudentService,
};

/// Application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub student_service: Arc<dyn StudentService>,
    pub course_service: Arc<dyn CourseService>,
    pub enrollment_service: Arc<dyn EnrollmentService>,
    /// Shared store (read directly only by the health check)
    pub database: Arc<Database>,
}

impl AppState {
    /// Build the state with every service over one database.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_database(database.clone(), config);
        Self::from_container(&container, database)
    }

    /// Build the state from any service container (mocks included).
    pub fn from_container(container: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            auth_service: container.auth(),
            student_service: container.students(),
            course_service: container.courses(),
            enrollment_service: container.enrollments(),
            database,
        }
    }
}
