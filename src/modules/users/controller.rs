use axum::extract::State;
use tracing::instrument;

use learnhub_auth::Role;
use learnhub_core::{ApiResponse, AppError, Paginated};

use crate::middleware::AuthorizedUser;
use crate::modules::users::model::{
    ChangeRoleDto, ChangeStatusDto, CreateUserDto, UpdateUserDto, User, UserFilterParams,
};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::{PathId, QueryParams, ValidatedJson};

#[utoipa::path(
    get,
    path = "/api/user/me",
    responses(
        (status = 200, description = "User data fetched successfully", body = ApiResponse<User>),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Token subject has no user record")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user), fields(user_id = %user.id()))]
pub async fn get_me(
    State(state): State<AppState>,
    user: AuthorizedUser,
) -> Result<ApiResponse<User>, AppError> {
    let me = UserService::get_me(&state.store, user.id()).await?;
    Ok(ApiResponse::ok("User data fetched successfully", me))
}

#[utoipa::path(
    get,
    path = "/api/user",
    params(
        ("email" = Option<String>, Query, description = "Exact email match"),
        ("searchTerm" = Option<String>, Query, description = "Substring of name or email"),
        ("role" = Option<Role>, Query, description = "Filter by role"),
        ("status" = Option<learnhub_auth::UserStatus>, Query, description = "Filter by status"),
        ("page" = Option<i64>, Query, description = "Page number (default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (1-100, default 10)"),
        ("sortBy" = Option<String>, Query, description = "name, email or createdAt"),
        ("sortOrder" = Option<String>, Query, description = "asc or desc")
    ),
    responses(
        (status = 200, description = "All users fetched successfully", body = ApiResponse<Paginated<User>>),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Requires ADMIN or SUPER_ADMIN")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user), fields(user_id = %user.id()))]
pub async fn get_users(
    State(state): State<AppState>,
    user: AuthorizedUser,
    QueryParams(filters): QueryParams<UserFilterParams>,
) -> Result<ApiResponse<Paginated<User>>, AppError> {
    let users = UserService::get_users(&state.store, filters).await?;
    Ok(ApiResponse::ok("All users fetched successfully", users))
}

#[utoipa::path(
    post,
    path = "/api/user/create",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "Student created successfully", body = ApiResponse<User>),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Requires ADMIN or SUPER_ADMIN"),
        (status = 409, description = "Email already in use"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user, dto), fields(user_id = %user.id()))]
pub async fn create_user(
    State(state): State<AppState>,
    user: AuthorizedUser,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<ApiResponse<User>, AppError> {
    let created =
        UserService::create_user(&state.store, dto, Role::Student, state.password_cost).await?;
    Ok(ApiResponse::created("User created successfully", created))
}

#[utoipa::path(
    post,
    path = "/api/user/instructor/create",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "Instructor created successfully", body = ApiResponse<User>),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Requires ADMIN or SUPER_ADMIN"),
        (status = 409, description = "Email already in use")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user, dto), fields(user_id = %user.id()))]
pub async fn create_instructor(
    State(state): State<AppState>,
    user: AuthorizedUser,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<ApiResponse<User>, AppError> {
    let created =
        UserService::create_user(&state.store, dto, Role::Instructor, state.password_cost).await?;
    Ok(ApiResponse::created("Instructor created successfully", created))
}

#[utoipa::path(
    post,
    path = "/api/user/admin/create",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "Admin created successfully", body = ApiResponse<User>),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Requires SUPER_ADMIN"),
        (status = 409, description = "Email already in use")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user, dto), fields(user_id = %user.id()))]
pub async fn create_admin(
    State(state): State<AppState>,
    user: AuthorizedUser,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<ApiResponse<User>, AppError> {
    let created =
        UserService::create_user(&state.store, dto, Role::Admin, state.password_cost).await?;
    Ok(ApiResponse::created("Admin created successfully", created))
}

#[utoipa::path(
    patch,
    path = "/api/user/update/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated successfully", body = ApiResponse<User>),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Requires ADMIN or SUPER_ADMIN"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already in use")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user), fields(user_id = %user.id()))]
pub async fn update_user(
    State(state): State<AppState>,
    user: AuthorizedUser,
    PathId(id): PathId,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<ApiResponse<User>, AppError> {
    let updated = UserService::update_user(&state.store, id, dto).await?;
    Ok(ApiResponse::ok("User updated successfully", updated))
}

#[utoipa::path(
    patch,
    path = "/api/user/{id}/status",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = ChangeStatusDto,
    responses(
        (status = 200, description = "User status changed successfully", body = ApiResponse<User>),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Requires ADMIN or SUPER_ADMIN"),
        (status = 404, description = "User not found")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user), fields(user_id = %user.id()))]
pub async fn change_status(
    State(state): State<AppState>,
    user: AuthorizedUser,
    PathId(id): PathId,
    ValidatedJson(dto): ValidatedJson<ChangeStatusDto>,
) -> Result<ApiResponse<User>, AppError> {
    let updated = UserService::change_status(&state.store, id, dto.status).await?;
    Ok(ApiResponse::ok("User status changed successfully", updated))
}

#[utoipa::path(
    patch,
    path = "/api/user/user/role",
    request_body = ChangeRoleDto,
    responses(
        (status = 200, description = "User role changed successfully", body = ApiResponse<User>),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Requires SUPER_ADMIN"),
        (status = 404, description = "User not found")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user), fields(user_id = %user.id()))]
pub async fn change_role(
    State(state): State<AppState>,
    user: AuthorizedUser,
    ValidatedJson(dto): ValidatedJson<ChangeRoleDto>,
) -> Result<ApiResponse<User>, AppError> {
    let updated = UserService::change_role(&state.store, dto).await?;
    Ok(ApiResponse::ok("User role changed successfully", updated))
}
