//! CRUD over the authoritative course records.
//!
//! Identifiers arrive as raw strings from the transport and are validated here,
//! before any store call.

use campus_domain::id::CourseId;

use crate::domain::repository::CourseRepository;
use crate::domain::types::{Course, CoursePatch, NewCourse};
use crate::error::CatalogError;

pub fn parse_course_id(raw: &str) -> Result<CourseId, CatalogError> {
    raw.parse().map_err(|_| CatalogError::InvalidId)
}

pub struct CatalogStore<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> CatalogStore<R> {
    pub async fn create(&self, input: &NewCourse) -> Result<CourseId, CatalogError> {
        if input.title.trim().is_empty() {
            return Err(CatalogError::MissingData);
        }
        if input.duration <= 0 {
            return Err(CatalogError::InvalidDuration);
        }
        self.repo.create(input).await
    }

    pub async fn get(&self, raw_id: &str) -> Result<Course, CatalogError> {
        let id = parse_course_id(raw_id)?;
        self.resolve(id).await?.ok_or(CatalogError::CourseNotFound)
    }

    /// Lookup by an already-validated id; `None` when the course is gone.
    pub async fn resolve(&self, id: CourseId) -> Result<Option<Course>, CatalogError> {
        self.repo.get(id).await
    }

    pub async fn list(&self) -> Result<Vec<Course>, CatalogError> {
        self.repo.list().await
    }

    pub async fn update(&self, raw_id: &str, patch: &CoursePatch) -> Result<u64, CatalogError> {
        let id = parse_course_id(raw_id)?;
        if patch.is_empty() {
            return Err(CatalogError::MissingData);
        }
        if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(CatalogError::MissingData);
        }
        if patch.duration.is_some_and(|d| d <= 0) {
            return Err(CatalogError::InvalidDuration);
        }
        match self.repo.update(id, patch).await? {
            0 => Err(CatalogError::CourseNotFound),
            matched => Ok(matched),
        }
    }

    pub async fn delete(&self, raw_id: &str) -> Result<u64, CatalogError> {
        let id = parse_course_id(raw_id)?;
        match self.repo.delete(id).await? {
            0 => Err(CatalogError::CourseNotFound),
            deleted => Ok(deleted),
        }
    }
}
