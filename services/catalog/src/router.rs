use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware::from_fn_with_state,
    routing::{get, patch, post, put},
};
use tower_http::cors::CorsLayer;

use campus_core::health::healthz;
use campus_core::middleware::{http_trace_layer, propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    admin::reindex,
    course::{create_course, delete_course, get_course, list_courses, update_course},
    enrollment::{enroll, list_my_courses, unenroll},
    health::readyz,
    search::search_courses,
    user::{get_me, get_user, list_users, login, register, set_role, update_me},
};
use crate::middleware::{require_admin, require_bearer};
use crate::state::AppState;

/// Deployment switches that change the route table.
#[derive(Debug, Clone, Default)]
pub struct RouteOptions {
    /// Course creation needs only a valid token instead of the `admin` role.
    pub open_course_writes: bool,
    /// Browser origin allowed to call the API with credentials.
    pub cors_allow_origin: Option<HeaderValue>,
}

pub fn build_router(state: AppState, options: RouteOptions) -> Router {
    let admin = from_fn_with_state(state.clone(), require_admin);
    let course_writer = if options.open_course_writes {
        post(create_course).route_layer(from_fn_with_state(state.clone(), require_bearer))
    } else {
        post(create_course).route_layer(admin.clone())
    };

    let router = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .route("/users/@me", get(get_me).patch(update_me))
        .route("/users", get(list_users).route_layer(admin.clone()))
        .route("/users/{id}", get(get_user).route_layer(admin.clone()))
        .route("/users/{id}/role", put(set_role).route_layer(admin.clone()))
        // Courses
        .route("/courses", get(list_courses))
        .route("/courses", course_writer)
        .route("/courses/{id}", get(get_course))
        .route(
            "/courses/{id}",
            patch(update_course)
                .delete(delete_course)
                .route_layer(admin.clone()),
        )
        // Enrollments
        .route(
            "/enrollments",
            post(enroll).get(list_my_courses).delete(unenroll),
        )
        // Search
        .route("/search", get(search_courses))
        // Admin
        .route("/admin/reindex", post(reindex).route_layer(admin))
        .with_state(state)
        .layer(propagate_request_id_layer())
        .layer(http_trace_layer())
        .layer(request_id_layer());

    match options.cors_allow_origin {
        Some(origin) => router.layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                ])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
                .allow_credentials(true),
        ),
        None => router,
    }
}
