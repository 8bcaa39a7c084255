//! Enrollment manager.
//!
//! The enrolling user is always the verified token subject; no operation here
//! accepts a user id from the caller.

use chrono::Utc;

use campus_auth_types::token::TokenService;
use campus_domain::id::CourseId;

use crate::domain::repository::{CourseRepository, EnrollmentRepository};
use crate::domain::types::{Course, Enrollment, EnrollmentStatus};
use crate::error::CatalogError;
use crate::usecase::catalog::{CatalogStore, parse_course_id};

/// Result of listing the caller's courses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrolledCourses {
    /// The caller has no enrollment records at all.
    NotEnrolled,
    /// Courses that still resolve; orphaned enrollments are dropped.
    Courses(Vec<Course>),
}

pub struct EnrollmentManager<E: EnrollmentRepository, C: CourseRepository> {
    pub enrollments: E,
    pub catalog: CatalogStore<C>,
    pub tokens: TokenService,
}

impl<E: EnrollmentRepository, C: CourseRepository> EnrollmentManager<E, C> {
    /// The course is not required to exist.
    pub async fn enroll(&self, token: &str, course_id: &str) -> Result<Enrollment, CatalogError> {
        let info = self.tokens.verify(token)?;
        let course_id = parse_course_id(course_id)?;
        let enrollment = Enrollment {
            user_id: info.subject_id,
            course_id: course_id.to_string(),
            status: EnrollmentStatus::Active,
            created_at: Utc::now(),
        };
        self.enrollments.create(&enrollment).await?;
        tracing::info!(
            user_id = %enrollment.user_id,
            course_id = %enrollment.course_id,
            "enrolled"
        );
        Ok(enrollment)
    }

    pub async fn unenroll(&self, token: &str, course_id: &str) -> Result<(), CatalogError> {
        let info = self.tokens.verify(token)?;
        let course_id = parse_course_id(course_id)?;
        if !self
            .enrollments
            .delete(info.subject_id, &course_id.to_string())
            .await?
        {
            return Err(CatalogError::EnrollmentNotFound);
        }
        Ok(())
    }

    pub async fn list_for_user(&self, token: &str) -> Result<EnrolledCourses, CatalogError> {
        let info = self.tokens.verify(token)?;
        let enrollments = self.enrollments.list_by_user(info.subject_id).await?;
        if enrollments.is_empty() {
            return Ok(EnrolledCourses::NotEnrolled);
        }

        let mut courses = Vec::with_capacity(enrollments.len());
        for enrollment in enrollments {
            let Ok(id) = enrollment.course_id.parse::<CourseId>() else {
                tracing::debug!(
                    course_id = %enrollment.course_id,
                    "skipping malformed course reference"
                );
                continue;
            };
            match self.catalog.resolve(id).await? {
                Some(course) => courses.push(course),
                None => {
                    tracing::debug!(course_id = %id, "skipping orphaned enrollment");
                }
            }
        }
        Ok(EnrolledCourses::Courses(courses))
    }
}
