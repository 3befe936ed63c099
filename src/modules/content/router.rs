use learnhub_auth::AuthError;

use crate::routes::{
    CONTENT_BY_MODULE, CONTENT_CREATE, CONTENT_DELETE, CONTENT_GET, CONTENT_UPDATE, RouteBinder,
};

use super::controller::{
    create_content, delete_content, get_content, get_contents_by_module, update_content,
};

pub fn bind_content_routes(binder: RouteBinder<'_>) -> Result<RouteBinder<'_>, AuthError> {
    binder
        .bind(CONTENT_CREATE, create_content)?
        .bind(CONTENT_BY_MODULE, get_contents_by_module)?
        .bind(CONTENT_GET, get_content)?
        .bind(CONTENT_UPDATE, update_content)?
        .bind(CONTENT_DELETE, delete_content)
}
