use learnhub_auth::AuthError;

use crate::routes::{COURSE_CREATE, COURSE_LIST, RouteBinder};

use super::controller::{create_course, get_courses};

pub fn bind_course_routes(binder: RouteBinder<'_>) -> Result<RouteBinder<'_>, AuthError> {
    binder
        .bind(COURSE_CREATE, create_course)?
        .bind(COURSE_LIST, get_courses)
}
