#![allow(async_fn_in_trait)]

use campus_domain::id::{CourseId, UserId};
use campus_domain::user::UserRole;

use crate::domain::types::{
    Course, CoursePatch, Enrollment, NewCourse, NewUser, SearchDocument, User,
};
use crate::error::CatalogError;

/// Repository for user accounts (relational store).
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, CatalogError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CatalogError>;
    async fn list(&self) -> Result<Vec<User>, CatalogError>;

    /// Insert and return the store-assigned id. Duplicate email → `EmailTaken`.
    async fn create(&self, user: &NewUser) -> Result<UserId, CatalogError>;

    /// Returns `false` when no such user exists.
    async fn update_profile(
        &self,
        id: UserId,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<bool, CatalogError>;

    /// Returns `false` when no such user exists.
    async fn set_role(&self, id: UserId, role: UserRole) -> Result<bool, CatalogError>;
}

/// Repository for the authoritative course records.
pub trait CourseRepository: Send + Sync {
    async fn create(&self, course: &NewCourse) -> Result<CourseId, CatalogError>;
    async fn get(&self, id: CourseId) -> Result<Option<Course>, CatalogError>;
    async fn list(&self) -> Result<Vec<Course>, CatalogError>;

    /// Partial merge. Returns the number of matched records (0 or 1).
    async fn update(&self, id: CourseId, patch: &CoursePatch) -> Result<u64, CatalogError>;

    /// Returns the number of deleted records (0 or 1).
    async fn delete(&self, id: CourseId) -> Result<u64, CatalogError>;
}

/// Repository for enrollment records.
pub trait EnrollmentRepository: Send + Sync {
    /// Duplicate (user, course) pair → `AlreadyEnrolled`.
    async fn create(&self, enrollment: &Enrollment) -> Result<(), CatalogError>;

    /// Delete the record matching both keys. Returns `true` if one was removed.
    async fn delete(&self, user_id: UserId, course_id: &str) -> Result<bool, CatalogError>;

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Enrollment>, CatalogError>;
}

/// External full-text index. Treated as a write-through projection.
pub trait SearchIndex: Send + Sync {
    /// Upsert keyed by `doc.id`, committed before returning.
    async fn upsert(&self, doc: &SearchDocument) -> Result<(), CatalogError>;
    async fn remove(&self, id: &str) -> Result<(), CatalogError>;

    /// Run a raw index query and return the response body untouched.
    async fn select(&self, query: &str) -> Result<serde_json::Value, CatalogError>;
}
