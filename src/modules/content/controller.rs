use axum::extract::State;
use tracing::instrument;

use learnhub_core::{ApiResponse, AppError};

use crate::middleware::AuthorizedUser;
use crate::modules::content::model::{Content, CreateContentDto, UpdateContentDto};
use crate::modules::content::service::ContentService;
use crate::state::AppState;
use crate::validator::{PathId, ValidatedJson};

#[utoipa::path(
    post,
    path = "/api/content/create-content",
    request_body = CreateContentDto,
    responses(
        (status = 201, description = "Content created successfully", body = ApiResponse<Content>),
        (status = 400, description = "Malformed request body"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Requires INSTRUCTOR"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Content",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user), fields(user_id = %user.id()))]
pub async fn create_content(
    State(state): State<AppState>,
    user: AuthorizedUser,
    ValidatedJson(dto): ValidatedJson<CreateContentDto>,
) -> Result<ApiResponse<Content>, AppError> {
    let content = ContentService::create_content(&state.store, dto).await?;
    Ok(ApiResponse::created("Content created successfully", content))
}

#[utoipa::path(
    get,
    path = "/api/content/moduleId/{id}",
    params(
        ("id" = Uuid, Path, description = "Module ID")
    ),
    responses(
        (status = 200, description = "Content retrieved successfully", body = ApiResponse<Vec<Content>>),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    tag = "Content",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user), fields(user_id = %user.id()))]
pub async fn get_contents_by_module(
    State(state): State<AppState>,
    user: AuthorizedUser,
    PathId(module_id): PathId,
) -> Result<ApiResponse<Vec<Content>>, AppError> {
    let contents = ContentService::get_contents_by_module(&state.store, module_id).await?;
    Ok(ApiResponse::ok("Content retrieved successfully", contents))
}

#[utoipa::path(
    get,
    path = "/api/content/{id}",
    params(
        ("id" = Uuid, Path, description = "Content ID")
    ),
    responses(
        (status = 200, description = "Content retrieved successfully", body = ApiResponse<Content>),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Content not found")
    ),
    tag = "Content",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user), fields(user_id = %user.id()))]
pub async fn get_content(
    State(state): State<AppState>,
    user: AuthorizedUser,
    PathId(id): PathId,
) -> Result<ApiResponse<Content>, AppError> {
    let content = ContentService::get_content_by_id(&state.store, id).await?;
    Ok(ApiResponse::ok("Content retrieved successfully", content))
}

#[utoipa::path(
    patch,
    path = "/api/content/{id}",
    params(
        ("id" = Uuid, Path, description = "Content ID")
    ),
    request_body = UpdateContentDto,
    responses(
        (status = 200, description = "Content updated successfully", body = ApiResponse<Content>),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Requires INSTRUCTOR, ADMIN or SUPER_ADMIN"),
        (status = 404, description = "Content not found")
    ),
    tag = "Content",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user), fields(user_id = %user.id()))]
pub async fn update_content(
    State(state): State<AppState>,
    user: AuthorizedUser,
    PathId(id): PathId,
    ValidatedJson(dto): ValidatedJson<UpdateContentDto>,
) -> Result<ApiResponse<Content>, AppError> {
    let content = ContentService::update_content(&state.store, id, dto).await?;
    Ok(ApiResponse::ok("Content updated successfully", content))
}

#[utoipa::path(
    delete,
    path = "/api/content/delete-content/{id}",
    params(
        ("id" = Uuid, Path, description = "Content ID")
    ),
    responses(
        (status = 200, description = "Content deleted successfully", body = ApiResponse<Content>),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Requires INSTRUCTOR"),
        (status = 404, description = "Content not found")
    ),
    tag = "Content",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user), fields(user_id = %user.id()))]
pub async fn delete_content(
    State(state): State<AppState>,
    user: AuthorizedUser,
    PathId(id): PathId,
) -> Result<ApiResponse<Content>, AppError> {
    let content = ContentService::delete_content(&state.store, id).await?;
    Ok(ApiResponse::ok("Content deleted successfully", content))
}
