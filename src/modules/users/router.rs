use learnhub_auth::AuthError;

use crate::routes::{
    RouteBinder, USER_CHANGE_ROLE, USER_CREATE, USER_CREATE_ADMIN, USER_CREATE_INSTRUCTOR,
    USER_LIST, USER_ME, USER_STATUS, USER_UPDATE,
};

use super::controller::{
    change_role, change_status, create_admin, create_instructor, create_user, get_me, get_users,
    update_user,
};

pub fn bind_user_routes(binder: RouteBinder<'_>) -> Result<RouteBinder<'_>, AuthError> {
    binder
        .bind(USER_ME, get_me)?
        .bind(USER_LIST, get_users)?
        .bind(USER_CREATE, create_user)?
        .bind(USER_UPDATE, update_user)?
        .bind(USER_STATUS, change_status)?
        .bind(USER_CREATE_INSTRUCTOR, create_instructor)?
        .bind(USER_CREATE_ADMIN, create_admin)?
        .bind(USER_CHANGE_ROLE, change_role)
}
