use crate::domain::repository::{CourseRepository, SearchIndex};
use crate::domain::types::{Course, CoursePatch, NewCourse};
use crate::error::CatalogError;
use crate::usecase::catalog::{CatalogStore, parse_course_id};
use crate::usecase::index::IndexSynchronizer;

// ── CreateCourse ─────────────────────────────────────────────────────────────

pub struct CreateCourseUseCase<R: CourseRepository, I: SearchIndex> {
    pub catalog: CatalogStore<R>,
    pub sync: IndexSynchronizer<I>,
}

impl<R: CourseRepository, I: SearchIndex> CreateCourseUseCase<R, I> {
    pub async fn execute(&self, input: NewCourse) -> Result<Course, CatalogError> {
        let id = self.catalog.create(&input).await?;
        let course = self
            .catalog
            .resolve(id)
            .await?
            .ok_or(CatalogError::CourseNotFound)?;
        self.sync.project_and_push(&course).await;
        Ok(course)
    }
}

// ── UpdateCourse ─────────────────────────────────────────────────────────────

pub struct UpdateCourseUseCase<R: CourseRepository, I: SearchIndex> {
    pub catalog: CatalogStore<R>,
    pub sync: IndexSynchronizer<I>,
}

impl<R: CourseRepository, I: SearchIndex> UpdateCourseUseCase<R, I> {
    /// Merge `patch`, then push the full merged record (not just the patch).
    pub async fn execute(&self, raw_id: &str, patch: CoursePatch) -> Result<Course, CatalogError> {
        self.catalog.update(raw_id, &patch).await?;
        let course = self.catalog.get(raw_id).await?;
        self.sync.project_and_push(&course).await;
        Ok(course)
    }
}

// ── DeleteCourse ─────────────────────────────────────────────────────────────

pub struct DeleteCourseUseCase<R: CourseRepository, I: SearchIndex> {
    pub catalog: CatalogStore<R>,
    pub sync: IndexSynchronizer<I>,
}

impl<R: CourseRepository, I: SearchIndex> DeleteCourseUseCase<R, I> {
    /// Enrollments referencing the course are left in place.
    pub async fn execute(&self, raw_id: &str) -> Result<(), CatalogError> {
        let id = parse_course_id(raw_id)?;
        self.catalog.delete(raw_id).await?;
        self.sync.remove(id).await;
        Ok(())
    }
}
