use axum::extract::State;
use tracing::instrument;

use learnhub_core::{ApiResponse, AppError, Paginated, PaginationParams};

use crate::middleware::AuthorizedUser;
use crate::modules::course::model::{Course, CreateCourseDto};
use crate::modules::course::service::CourseService;
use crate::state::AppState;
use crate::validator::{QueryParams, ValidatedJson};

#[utoipa::path(
    post,
    path = "/api/course",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created successfully", body = ApiResponse<Course>),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Requires ADMIN, INSTRUCTOR or SUPER_ADMIN"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Course",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user), fields(user_id = %user.id()))]
pub async fn create_course(
    State(state): State<AppState>,
    user: AuthorizedUser,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<ApiResponse<Course>, AppError> {
    let course = CourseService::create_course(&state.store, dto).await?;
    Ok(ApiResponse::created("Course created successfully", course))
}

#[utoipa::path(
    get,
    path = "/api/course",
    params(PaginationParams),
    responses(
        (status = 200, description = "Courses retrieved successfully", body = ApiResponse<Paginated<Course>>),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    tag = "Course",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user), fields(user_id = %user.id()))]
pub async fn get_courses(
    State(state): State<AppState>,
    user: AuthorizedUser,
    QueryParams(params): QueryParams<PaginationParams>,
) -> Result<ApiResponse<Paginated<Course>>, AppError> {
    let courses = CourseService::get_courses(&state.store, params).await?;
    Ok(ApiResponse::ok("Courses retrieved successfully", courses))
}
