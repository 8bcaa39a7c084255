//! Route guards. Both insert the verified [`TokenInfo`] into request extensions.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use campus_auth_types::token::TokenInfo;
use campus_domain::user::UserRole;

use crate::error::CatalogError;
use crate::state::AppState;

fn authorization(req: &Request) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

/// Admit only callers whose stored role is `admin`.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, CatalogError> {
    let header = authorization(&req);
    state
        .role_gate()
        .require_role(UserRole::Admin, header.as_deref(), |info: TokenInfo| async move {
            req.extensions_mut().insert(info);
            Ok(next.run(req).await)
        })
        .await
}

/// Admit any caller with a valid token.
pub async fn require_bearer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, CatalogError> {
    let info = state.role_gate().authenticate(authorization(&req).as_deref())?;
    req.extensions_mut().insert(info);
    Ok(next.run(req).await)
}
