//! Course handlers.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{parse_id, required};
use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::{
    MSG_COURSE_CREATED, MSG_COURSE_DELETED, MSG_COURSE_NOT_FOUND, MSG_COURSE_UPDATED,
};
use crate::domain::{Course, NewCourse, UpdateCourse};
use crate::errors::AppResult;
use crate::services::CourseFilter;
use crate::types::{ApiResponse, Created, Paginated, PaginationParams};

/// Course creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[validate(
        required(message = "All fields required"),
        length(min = 1, message = "All fields required")
    )]
    #[schema(example = "Compilers")]
    pub name: Option<String>,
    #[validate(
        required(message = "All fields required"),
        length(min = 1, message = "All fields required")
    )]
    #[schema(example = "CS401")]
    pub course_code: Option<String>,
    #[validate(
        required(message = "All fields required"),
        length(min = 1, message = "All fields required")
    )]
    #[schema(example = "Parsing, analysis and code generation")]
    pub description: Option<String>,
    #[validate(
        required(message = "All fields required"),
        range(min = 1, message = "All fields required")
    )]
    #[schema(example = 4)]
    pub credits: Option<u32>,
    #[validate(
        required(message = "All fields required"),
        length(min = 1, message = "All fields required")
    )]
    #[schema(example = "Dr. Aho")]
    pub instructor: Option<String>,
    #[validate(
        required(message = "All fields required"),
        range(min = 1, message = "All fields required")
    )]
    #[schema(example = 30)]
    pub max_capacity: Option<u32>,
}

impl CreateCourseRequest {
    fn into_new_course(self) -> AppResult<NewCourse> {
        Ok(NewCourse {
            name: required(self.name)?,
            course_code: required(self.course_code)?,
            description: required(self.description)?,
            credits: required(self.credits)?,
            instructor: required(self.instructor)?,
            max_capacity: required(self.max_capacity)?,
        })
    }
}

/// Query parameters for listing courses
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseListQuery {
    /// Page number (1-indexed, default 1)
    pub page: Option<String>,
    /// Page size (default 10, max 100)
    pub limit: Option<String>,
    /// Case-insensitive match on name or course code
    pub search: Option<String>,
    /// `true` keeps only courses with free seats (ignored when `search` is set)
    pub available: Option<String>,
}

/// Create course routes
pub fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route(
            "/:id",
            get(get_course).put(update_course).delete(delete_course),
        )
}

/// Create a course
#[utoipa::path(
    post,
    path = "/api/courses",
    tag = "Courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Missing field, or code / name taken")
    )
)]
pub async fn create_course(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCourseRequest>,
) -> AppResult<Created<Course>> {
    let course = state
        .course_service
        .create_course(payload.into_new_course()?)
        .await?;

    Ok(Created(ApiResponse::with_message(course, MSG_COURSE_CREATED)))
}

/// Get a course by id
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    tag = "Courses",
    params(("id" = String, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course", body = Course),
        (status = 404, description = "Course not found")
    )
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Course>> {
    let id = parse_id(&id, MSG_COURSE_NOT_FOUND)?;
    let course = state.course_service.get_course(id).await?;
    Ok(ApiResponse::success(course))
}

/// List courses with pagination, search and availability filter
#[utoipa::path(
    get,
    path = "/api/courses",
    tag = "Courses",
    params(CourseListQuery),
    responses((status = 200, description = "One page of courses", body = [Course]))
)]
pub async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<CourseListQuery>,
) -> AppResult<ApiResponse<Vec<Course>>> {
    let params = PaginationParams::from_query(query.page.as_deref(), query.limit.as_deref());
    let filter = CourseFilter {
        search: query.search,
        available_only: query.available.as_deref() == Some("true"),
    };

    let courses = state.course_service.list_courses(filter).await?;
    Ok(ApiResponse::paginated(Paginated::from_items(courses, params)))
}

/// Update a course
#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    tag = "Courses",
    params(("id" = String, Path, description = "Course ID")),
    request_body = UpdateCourse,
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 400, description = "Name taken, or capacity below current enrollment"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(changes): ValidatedJson<UpdateCourse>,
) -> AppResult<ApiResponse<Course>> {
    let id = parse_id(&id, MSG_COURSE_NOT_FOUND)?;
    let course = state.course_service.update_course(id, changes).await?;
    Ok(ApiResponse::with_message(course, MSG_COURSE_UPDATED))
}

/// Delete a course and its enrollments
#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    tag = "Courses",
    params(("id" = String, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course deleted"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    let id = parse_id(&id, MSG_COURSE_NOT_FOUND)?;
    state.course_service.delete_course(id).await?;
    Ok(ApiResponse::message(MSG_COURSE_DELETED))
}
