//! `Authorization: Bearer <token>` extraction.

use axum::extract::FromRequestParts;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use http::header::AUTHORIZATION;
use http::request::Parts;

/// Strip an optional `Bearer` scheme from an `Authorization` header value.
///
/// A bare token (no scheme) is accepted. Any other scheme, or an empty token, yields `None`.
///
/// ```
/// use campus_auth_types::bearer::strip_bearer;
///
/// assert_eq!(strip_bearer("Bearer abc.def.ghi"), Some("abc.def.ghi"));
/// assert_eq!(strip_bearer("abc.def.ghi"), Some("abc.def.ghi"));
/// assert_eq!(strip_bearer("Basic dXNlcjpwYXNz"), None);
/// assert_eq!(strip_bearer("Bearer "), None);
/// ```
pub fn strip_bearer(value: &str) -> Option<&str> {
    let value = value.trim();
    let token = match value.split_once(char::is_whitespace) {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        Some(_) => return None,
        None if value.eq_ignore_ascii_case("bearer") => return None,
        None => value,
    };
    (!token.is_empty()).then_some(token)
}

/// Raw bearer token from the `Authorization` header. Not yet verified.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

/// Rejection for a missing or malformed `Authorization` header.
#[derive(Debug, Clone, Copy)]
pub struct MissingBearer;

impl IntoResponse for MissingBearer {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "kind": "UNAUTHENTICATED",
            "message": "missing bearer token",
        });
        (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = MissingBearer;

    // Extract synchronously and return a 'static future; borrowing `parts` across
    // the await trips the `impl Future + Send` signature in axum-core 0.5.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(strip_bearer)
            .map(str::to_owned);

        async move {
            let token = token.ok_or(MissingBearer)?;
            Ok(Self(token))
        }
    }
}
