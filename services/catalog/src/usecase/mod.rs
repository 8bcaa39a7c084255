pub mod authorize;
pub mod catalog;
pub mod course;
pub mod enrollment;
pub mod index;
pub mod search;
pub mod user;
