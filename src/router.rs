use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use learnhub_auth::AuthError;
use learnhub_core::AppError;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::auth::require_auth;
use crate::modules::content::bind_content_routes;
use crate::modules::course::bind_course_routes;
use crate::modules::users::bind_user_routes;
use crate::routes::{RouteBinder, RouteTable};
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::not_found("Route not found")
}

async fn method_not_allowed() -> AppError {
    AppError::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

/// Every declared route, each behind its own authorization gate.
fn protected_routes(table: &RouteTable) -> Result<Router<AppState>, AuthError> {
    let binder = RouteBinder::new(table);
    let binder = bind_content_routes(binder)?;
    let binder = bind_course_routes(binder)?;
    let binder = bind_user_routes(binder)?;
    binder.finish()
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

/// Builds the application router for [`RouteTable::standard`].
///
/// Fails before any request is served if the table is misconfigured.
pub fn init_router(state: AppState) -> Result<Router, AuthError> {
    init_router_with_table(state, &RouteTable::standard()?)
}

/// Layer order per request: logging, CORS, authentication gate, the route's
/// authorization gate, handler.
pub fn init_router_with_table(state: AppState, table: &RouteTable) -> Result<Router, AuthError> {
    let protected = protected_routes(table)?.route_layer(middleware::from_fn_with_state(
        state.verifier.clone(),
        require_auth,
    ));

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(protected)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state.clone())
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(logging_middleware));

    Ok(router)
}
