use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use campus_auth_types::bearer::BearerToken;

use crate::domain::types::EnrollmentStatus;
use crate::error::CatalogError;
use crate::handlers::course::CourseResponse;
use crate::state::AppState;
use crate::usecase::enrollment::EnrolledCourses;

// ── POST /enrollments ────────────────────────────────────────────────────────

/// Any `user_id` in the body is ignored; the token decides who enrolls.
#[derive(Deserialize)]
pub struct EnrollRequest {
    #[serde(default)]
    pub course_id: String,
}

#[derive(Serialize)]
pub struct EnrollmentResponse {
    pub user_id: i64,
    pub course_id: String,
    pub status: EnrollmentStatus,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

pub async fn enroll(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<EnrollRequest>, CatalogError>,
) -> Result<(StatusCode, Json<EnrollmentResponse>), CatalogError> {
    let enrollment = state.enrollment_manager().enroll(&token, &body.course_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(EnrollmentResponse {
            user_id: enrollment.user_id.0,
            course_id: enrollment.course_id,
            status: enrollment.status,
            created_at: enrollment.created_at,
        }),
    ))
}

// ── DELETE /enrollments?course_id= ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct UnenrollQuery {
    pub course_id: Option<String>,
}

pub async fn unenroll(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<UnenrollQuery>, CatalogError>,
) -> Result<StatusCode, CatalogError> {
    let course_id = query.course_id.ok_or(CatalogError::MissingData)?;
    state.enrollment_manager().unenroll(&token, &course_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /enrollments ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MyCoursesResponse {
    pub courses: Vec<CourseResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

pub async fn list_my_courses(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
) -> Result<Json<MyCoursesResponse>, CatalogError> {
    let response = match state.enrollment_manager().list_for_user(&token).await? {
        EnrolledCourses::NotEnrolled => MyCoursesResponse {
            courses: Vec::new(),
            message: Some("not enrolled in any course"),
        },
        EnrolledCourses::Courses(courses) => MyCoursesResponse {
            courses: courses.into_iter().map(CourseResponse::from).collect(),
            message: None,
        },
    };
    Ok(Json(response))
}
