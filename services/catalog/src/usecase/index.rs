//! Keeps the search index in step with the course store.
//!
//! The store is the source of truth. Index writes never fail the caller: a
//! failed push is logged and left for the next mutation or `reindex_all` to fix.

use serde::Serialize;

use campus_domain::id::CourseId;

use crate::domain::repository::{CourseRepository, SearchIndex};
use crate::domain::types::{Course, SearchDocument};
use crate::error::CatalogError;
use crate::usecase::catalog::CatalogStore;

fn chain(e: CatalogError) -> String {
    format!("{:#}", anyhow::Error::new(e))
}

/// Outcome of a full re-index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReindexReport {
    pub pushed: usize,
    pub failed: usize,
}

pub struct IndexSynchronizer<I: SearchIndex> {
    pub index: I,
}

impl<I: SearchIndex> IndexSynchronizer<I> {
    /// Upsert the projection of `course`. Returns whether the index accepted it.
    pub async fn project_and_push(&self, course: &Course) -> bool {
        let doc = SearchDocument::from(course);
        match self.index.upsert(&doc).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    course_id = %course.id,
                    error = %chain(e),
                    "search index push failed"
                );
                false
            }
        }
    }

    /// Drop the index entry for a deleted course.
    pub async fn remove(&self, id: CourseId) -> bool {
        match self.index.remove(&id.to_string()).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    course_id = %id,
                    error = %chain(e),
                    "search index delete failed"
                );
                false
            }
        }
    }

    /// Push every stored course. Upserts are keyed by id, so repeated runs
    /// converge on the same index content.
    pub async fn reindex_all<R: CourseRepository>(
        &self,
        catalog: &CatalogStore<R>,
    ) -> Result<ReindexReport, CatalogError> {
        let courses = catalog.list().await?;
        let mut report = ReindexReport::default();
        for course in &courses {
            if self.project_and_push(course).await {
                report.pushed += 1;
            } else {
                report.failed += 1;
            }
        }
        tracing::info!(
            pushed = report.pushed,
            failed = report.failed,
            "search index rebuilt"
        );
        Ok(report)
    }
}
