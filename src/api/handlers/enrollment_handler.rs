//! Enrollment handlers.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{parse_id, parse_query, required};
use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::{
    MSG_COURSE_NOT_FOUND, MSG_ENROLLED, MSG_ENROLLMENT_DROPPED, MSG_ENROLLMENT_NOT_FOUND,
    MSG_ENROLLMENT_UPDATED, MSG_STUDENT_NOT_FOUND,
};
use crate::domain::{Enrollment, UpdateEnrollment};
use crate::errors::AppResult;
use crate::services::EnrollmentFilter;
use crate::types::{ApiResponse, Created, Paginated, PaginationParams};

/// Enrollment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    #[validate(
        required(message = "All fields required"),
        length(min = 1, message = "All fields required")
    )]
    pub student_id: Option<String>,
    #[validate(
        required(message = "All fields required"),
        length(min = 1, message = "All fields required")
    )]
    pub course_id: Option<String>,
}

/// Query parameters for listing enrollments
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EnrollmentListQuery {
    /// Page number (1-indexed, default 1)
    pub page: Option<String>,
    /// Page size (default 10, max 100)
    pub limit: Option<String>,
    /// Every enrollment of this student, any status
    pub student_id: Option<String>,
    /// Active enrollments of this course (ignored when `studentId` is set)
    pub course_id: Option<String>,
}

/// Create enrollment routes
pub fn enrollment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_enrollments).post(enroll))
        .route(
            "/:id",
            get(get_enrollment)
                .put(update_enrollment)
                .delete(drop_enrollment),
        )
}

/// Enroll a student in a course
#[utoipa::path(
    post,
    path = "/api/enrollments",
    tag = "Enrollments",
    request_body = EnrollRequest,
    responses(
        (status = 201, description = "Enrolled", body = Enrollment),
        (status = 400, description = "Missing field, already enrolled, or course full"),
        (status = 404, description = "Student or course not found")
    )
)]
pub async fn enroll(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<EnrollRequest>,
) -> AppResult<Created<Enrollment>> {
    let student_id = parse_id(&required(payload.student_id)?, MSG_STUDENT_NOT_FOUND)?;
    let course_id = match parse_id(&required(payload.course_id)?, MSG_COURSE_NOT_FOUND) {
        Ok(id) => id,
        Err(err) => {
            // The student is checked before the course
            state.student_service.get_student(student_id).await?;
            return Err(err);
        }
    };

    let enrollment = state
        .enrollment_service
        .enroll(student_id, course_id)
        .await?;

    Ok(Created(ApiResponse::with_message(
        enrollment,
        MSG_ENROLLED,
    )))
}

/// Get an enrollment by id
#[utoipa::path(
    get,
    path = "/api/enrollments/{id}",
    tag = "Enrollments",
    params(("id" = String, Path, description = "Enrollment ID")),
    responses(
        (status = 200, description = "Enrollment", body = Enrollment),
        (status = 404, description = "Enrollment not found")
    )
)]
pub async fn get_enrollment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Enrollment>> {
    let id = parse_id(&id, MSG_ENROLLMENT_NOT_FOUND)?;
    let enrollment = state.enrollment_service.get_enrollment(id).await?;
    Ok(ApiResponse::success(enrollment))
}

/// List enrollments, optionally for one student or one course
#[utoipa::path(
    get,
    path = "/api/enrollments",
    tag = "Enrollments",
    params(EnrollmentListQuery),
    responses(
        (status = 200, description = "One page of enrollments", body = [Enrollment]),
        (status = 400, description = "Malformed studentId or courseId")
    )
)]
pub async fn list_enrollments(
    State(state): State<AppState>,
    Query(query): Query<EnrollmentListQuery>,
) -> AppResult<ApiResponse<Vec<Enrollment>>> {
    let params = PaginationParams::from_query(query.page.as_deref(), query.limit.as_deref());
    let filter = EnrollmentFilter {
        student_id: parse_query(query.student_id.as_deref(), "studentId")?,
        course_id: parse_query(query.course_id.as_deref(), "courseId")?,
    };

    let enrollments = state.enrollment_service.list_enrollments(filter).await?;
    Ok(ApiResponse::paginated(Paginated::from_items(
        enrollments,
        params,
    )))
}

/// Update an enrollment's grade or status
#[utoipa::path(
    put,
    path = "/api/enrollments/{id}",
    tag = "Enrollments",
    params(("id" = String, Path, description = "Enrollment ID")),
    request_body = UpdateEnrollment,
    responses(
        (status = 200, description = "Enrollment updated", body = Enrollment),
        (status = 400, description = "Reactivation would exceed capacity"),
        (status = 404, description = "Enrollment not found")
    )
)]
pub async fn update_enrollment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(changes): ValidatedJson<UpdateEnrollment>,
) -> AppResult<ApiResponse<Enrollment>> {
    let id = parse_id(&id, MSG_ENROLLMENT_NOT_FOUND)?;
    let enrollment = state
        .enrollment_service
        .update_enrollment(id, changes)
        .await?;
    Ok(ApiResponse::with_message(enrollment, MSG_ENROLLMENT_UPDATED))
}

/// Drop an enrollment, releasing its seat
#[utoipa::path(
    delete,
    path = "/api/enrollments/{id}",
    tag = "Enrollments",
    params(("id" = String, Path, description = "Enrollment ID")),
    responses(
        (status = 200, description = "Dropped course"),
        (status = 404, description = "Enrollment not found")
    )
)]
pub async fn drop_enrollment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    let id = parse_id(&id, MSG_ENROLLMENT_NOT_FOUND)?;
    state.enrollment_service.drop_enrollment(id).await?;
    Ok(ApiResponse::message(MSG_ENROLLMENT_DROPPED))
}
