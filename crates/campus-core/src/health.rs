use axum::http::StatusCode;

/// Handler for `GET /healthz`: liveness only, never touches a dependency.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
