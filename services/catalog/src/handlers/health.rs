use axum::extract::State;
use axum::http::StatusCode;

use campus_core::deadline::with_deadline;

use crate::state::AppState;

/// Handler for `GET /readyz`: ready once the database answers a ping.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    match with_deadline(state.store_timeout, "ping database", state.db.ping()).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
