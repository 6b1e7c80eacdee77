//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, course_handler, enrollment_handler, health_handler, student_handler,
};
use crate::domain::{
    Course, Enrollment, EnrollmentStatus, StudentResponse, UpdateCourse, UpdateEnrollment,
    UpdateStudent,
};
use crate::types::PaginationMeta;

/// OpenAPI documentation for the course registry
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Course Registry",
        version = "0.1.0",
        description = "Students, courses and enrollments with seat-capacity tracking"
    ),
    servers((url = "http://localhost:3000", description = "Local development server")),
    paths(
        health_handler::health,
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        auth_handler::me,
        // Student endpoints
        student_handler::create_student,
        student_handler::list_students,
        student_handler::get_student,
        student_handler::update_student,
        student_handler::delete_student,
        // Course endpoints
        course_handler::create_course,
        course_handler::list_courses,
        course_handler::get_course,
        course_handler::update_course,
        course_handler::delete_course,
        // Enrollment endpoints
        enrollment_handler::enroll,
        enrollment_handler::list_enrollments,
        enrollment_handler::get_enrollment,
        enrollment_handler::update_enrollment,
        enrollment_handler::drop_enrollment,
    ),
    components(
        schemas(
            // Domain types
            StudentResponse,
            UpdateStudent,
            Course,
            UpdateCourse,
            Enrollment,
            EnrollmentStatus,
            UpdateEnrollment,
            PaginationMeta,
            // Request and response bodies
            auth_handler::LoginRequest,
            auth_handler::AuthResponse,
            student_handler::CreateStudentRequest,
            course_handler::CreateCourseRequest,
            enrollment_handler::EnrollRequest,
            health_handler::HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and record counts"),
        (name = "Authentication", description = "Student registration and login"),
        (name = "Students", description = "Student records"),
        (name = "Courses", description = "Course catalog"),
        (name = "Enrollments", description = "Enrollment and seat management")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
