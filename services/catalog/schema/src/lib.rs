//! sea-orm entities for the catalog database.

pub mod courses;
pub mod enrollments;
pub mod users;
