use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use campus_auth_types::token::AuthError;

/// Catalog service error variants.
///
/// Every store and index failure is folded into [`CatalogError::Internal`] at the
/// repository boundary; driver errors never reach a response body.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid id")]
    InvalidId,
    #[error("missing data")]
    MissingData,
    #[error("invalid email")]
    InvalidEmail,
    #[error("duration must be a positive integer")]
    InvalidDuration,
    #[error("query parameter q is required")]
    MissingQuery,
    #[error("invalid role")]
    InvalidRole,
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("unauthenticated")]
    Unauthenticated,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("forbidden")]
    Forbidden,
    #[error("user not found")]
    UserNotFound,
    #[error("course not found")]
    CourseNotFound,
    #[error("enrollment not found")]
    EnrollmentNotFound,
    #[error("email already registered")]
    EmailTaken,
    #[error("already enrolled")]
    AlreadyEnrolled,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl CatalogError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidId => "INVALID_ID",
            Self::MissingData => "MISSING_DATA",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidDuration => "INVALID_DURATION",
            Self::MissingQuery => "MISSING_QUERY",
            Self::InvalidRole => "INVALID_ROLE",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::CourseNotFound => "COURSE_NOT_FOUND",
            Self::EnrollmentNotFound => "ENROLLMENT_NOT_FOUND",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::AlreadyEnrolled => "ALREADY_ENROLLED",
            Self::Internal(_) => "INTERNAL",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidId
            | Self::MissingData
            | Self::InvalidEmail
            | Self::InvalidDuration
            | Self::MissingQuery
            | Self::InvalidRole
            | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound | Self::CourseNotFound | Self::EnrollmentNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::EmailTaken | Self::AlreadyEnrolled => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AuthError> for CatalogError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Signing(source) => {
                Self::Internal(anyhow::Error::new(source).context("sign identity token"))
            }
            _ => Self::Unauthenticated,
        }
    }
}

// ── Extractor rejections ─────────────────────────────────────────────────────

impl From<JsonRejection> for CatalogError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl From<QueryRejection> for CatalogError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl From<PathRejection> for CatalogError {
    fn from(_: PathRejection) -> Self {
        Self::InvalidId
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %format!("{e:#}"), kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
