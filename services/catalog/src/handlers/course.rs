use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Course, CoursePatch, NewCourse};
use crate::error::CatalogError;
use crate::state::AppState;
use crate::usecase::course::{CreateCourseUseCase, DeleteCourseUseCase, UpdateCourseUseCase};

#[derive(Serialize)]
pub struct CourseResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub duration: i32,
    pub level: String,
    pub availability: bool,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id.to_string(),
            title: course.title,
            description: course.description,
            instructor: course.instructor,
            duration: course.duration,
            level: course.level,
            availability: course.availability,
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

// ── GET /courses ─────────────────────────────────────────────────────────────

pub async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseResponse>>, CatalogError> {
    let courses = state.catalog().list().await?;
    Ok(Json(courses.into_iter().map(CourseResponse::from).collect()))
}

// ── GET /courses/{id} ────────────────────────────────────────────────────────

pub async fn get_course(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<String>, CatalogError>,
) -> Result<Json<CourseResponse>, CatalogError> {
    let course = state.catalog().get(&id).await?;
    Ok(Json(course.into()))
}

// ── POST /courses ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateCourseRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub duration: i32,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub availability: bool,
}

pub async fn create_course(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<CreateCourseRequest>, CatalogError>,
) -> Result<(StatusCode, Json<CourseResponse>), CatalogError> {
    let usecase = CreateCourseUseCase {
        catalog: state.catalog(),
        sync: state.index_sync(),
    };
    let course = usecase
        .execute(NewCourse {
            title: body.title,
            description: body.description,
            instructor: body.instructor,
            duration: body.duration,
            level: body.level,
            availability: body.availability,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(course.into())))
}

// ── PATCH /courses/{id} ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub instructor: Option<String>,
    pub duration: Option<i32>,
    pub level: Option<String>,
    pub availability: Option<bool>,
}

pub async fn update_course(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<String>, CatalogError>,
    WithRejection(Json(body), _): WithRejection<Json<UpdateCourseRequest>, CatalogError>,
) -> Result<Json<CourseResponse>, CatalogError> {
    let usecase = UpdateCourseUseCase {
        catalog: state.catalog(),
        sync: state.index_sync(),
    };
    let course = usecase
        .execute(
            &id,
            CoursePatch {
                title: body.title,
                description: body.description,
                instructor: body.instructor,
                duration: body.duration,
                level: body.level,
                availability: body.availability,
            },
        )
        .await?;
    Ok(Json(course.into()))
}

// ── DELETE /courses/{id} ─────────────────────────────────────────────────────

pub async fn delete_course(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<String>, CatalogError>,
) -> Result<StatusCode, CatalogError> {
    let usecase = DeleteCourseUseCase {
        catalog: state.catalog(),
        sync: state.index_sync(),
    };
    usecase.execute(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
