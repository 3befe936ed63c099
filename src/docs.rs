use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use learnhub_auth::{Role, UserStatus};
use learnhub_core::{ErrorEnvelope, PaginationMeta, PaginationParams, SortOrder};

use crate::modules::content::model::{Content, ContentType, CreateContentDto, UpdateContentDto};
use crate::modules::course::model::{Course, CreateCourseDto};
use crate::modules::users::model::{
    ChangeRoleDto, ChangeStatusDto, CreateUserDto, UpdateUserDto, User,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::content::controller::create_content,
        crate::modules::content::controller::get_contents_by_module,
        crate::modules::content::controller::get_content,
        crate::modules::content::controller::update_content,
        crate::modules::content::controller::delete_content,
        crate::modules::course::controller::create_course,
        crate::modules::course::controller::get_courses,
        crate::modules::users::controller::get_me,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::create_instructor,
        crate::modules::users::controller::create_admin,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::change_status,
        crate::modules::users::controller::change_role,
    ),
    components(
        schemas(
            Role,
            UserStatus,
            ErrorEnvelope,
            PaginationMeta,
            PaginationParams,
            SortOrder,
            Content,
            ContentType,
            CreateContentDto,
            UpdateContentDto,
            Course,
            CreateCourseDto,
            User,
            CreateUserDto,
            UpdateUserDto,
            ChangeStatusDto,
            ChangeRoleDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Content", description = "Learning content attached to course modules"),
        (name = "Course", description = "Course catalogue"),
        (name = "Users", description = "User and role management")
    ),
    info(
        title = "LearnHub API",
        version = "0.1.0",
        description = "Learning platform API. Every endpoint requires a bearer JWT and is restricted to the roles listed in its description.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

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
                        .build(),
                ),
            )
        }
    }
}
