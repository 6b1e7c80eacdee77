//! Student handlers.

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
    MSG_STUDENT_CREATED, MSG_STUDENT_DELETED, MSG_STUDENT_NOT_FOUND, MSG_STUDENT_UPDATED,
};
use crate::domain::{NewStudent, StudentResponse, UpdateStudent};
use crate::errors::AppResult;
use crate::services::StudentFilter;
use crate::types::{ApiResponse, Created, Paginated, PaginationParams};

/// Student creation request (also used by registration)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    #[validate(
        required(message = "All fields required"),
        length(min = 1, message = "All fields required")
    )]
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[validate(
        required(message = "All fields required"),
        length(min = 1, message = "All fields required")
    )]
    #[schema(example = "ada@uni.edu")]
    pub email: Option<String>,
    #[validate(
        required(message = "All fields required"),
        length(min = 1, message = "All fields required")
    )]
    #[schema(example = "CS-2024-001")]
    pub roll_number: Option<String>,
    #[validate(
        required(message = "All fields required"),
        range(min = 1, message = "All fields required")
    )]
    #[schema(example = 1)]
    pub year: Option<u32>,
    #[validate(
        required(message = "All fields required"),
        length(min = 1, message = "All fields required")
    )]
    #[schema(example = "Computer Science")]
    pub department: Option<String>,
    #[validate(
        required(message = "All fields required"),
        length(min = 1, message = "All fields required")
    )]
    #[schema(example = "correct horse battery staple")]
    pub password: Option<String>,
}

impl CreateStudentRequest {
    pub fn into_new_student(self) -> AppResult<NewStudent> {
        Ok(NewStudent {
            name: required(self.name)?,
            email: required(self.email)?,
            roll_number: required(self.roll_number)?,
            year: required(self.year)?,
            department: required(self.department)?,
            password: required(self.password)?,
        })
    }
}

/// Query parameters for listing students
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentListQuery {
    /// Page number (1-indexed, default 1)
    pub page: Option<String>,
    /// Page size (default 10, max 100)
    pub limit: Option<String>,
    /// Case-insensitive match on name or roll number
    pub search: Option<String>,
    /// Exact year of study (ignored when `search` is set)
    pub year: Option<String>,
}

/// Create student routes
pub fn student_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_students).post(create_student))
        .route(
            "/:id",
            get(get_student).put(update_student).delete(delete_student),
        )
}

/// Create a student
#[utoipa::path(
    post,
    path = "/api/students",
    tag = "Students",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 400, description = "Missing field, or email / roll number taken")
    )
)]
pub async fn create_student(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateStudentRequest>,
) -> AppResult<Created<StudentResponse>> {
    let student = state
        .student_service
        .create_student(payload.into_new_student()?)
        .await?;

    Ok(Created(ApiResponse::with_message(
        StudentResponse::from(student),
        MSG_STUDENT_CREATED,
    )))
}

/// Get a student by id
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    tag = "Students",
    params(("id" = String, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student", body = StudentResponse),
        (status = 404, description = "Student not found")
    )
)]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<StudentResponse>> {
    let id = parse_id(&id, MSG_STUDENT_NOT_FOUND)?;
    let student = state.student_service.get_student(id).await?;
    Ok(ApiResponse::success(StudentResponse::from(student)))
}

/// List students with pagination, search and year filter
#[utoipa::path(
    get,
    path = "/api/students",
    tag = "Students",
    params(StudentListQuery),
    responses(
        (status = 200, description = "One page of students", body = [StudentResponse]),
        (status = 400, description = "Invalid year")
    )
)]
pub async fn list_students(
    State(state): State<AppState>,
    Query(query): Query<StudentListQuery>,
) -> AppResult<ApiResponse<Vec<StudentResponse>>> {
    let params = PaginationParams::from_query(query.page.as_deref(), query.limit.as_deref());
    let filter = StudentFilter {
        search: query.search,
        year: parse_query(query.year.as_deref(), "year")?,
    };

    let students = state.student_service.list_students(filter).await?;
    let page = Paginated::from_items(students, params).map(StudentResponse::from);
    Ok(ApiResponse::paginated(page))
}

/// Update a student
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    tag = "Students",
    params(("id" = String, Path, description = "Student ID")),
    request_body = UpdateStudent,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 400, description = "Email or roll number taken"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(changes): ValidatedJson<UpdateStudent>,
) -> AppResult<ApiResponse<StudentResponse>> {
    let id = parse_id(&id, MSG_STUDENT_NOT_FOUND)?;
    let student = state.student_service.update_student(id, changes).await?;
    Ok(ApiResponse::with_message(
        StudentResponse::from(student),
        MSG_STUDENT_UPDATED,
    ))
}

/// Delete a student and their enrollments
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    tag = "Students",
    params(("id" = String, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student deleted"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    let id = parse_id(&id, MSG_STUDENT_NOT_FOUND)?;
    state.student_service.delete_student(id).await?;
    Ok(ApiResponse::message(MSG_STUDENT_DELETED))
}
