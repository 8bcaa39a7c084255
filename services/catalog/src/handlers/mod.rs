pub mod admin;
pub mod course;
pub mod enrollment;
pub mod health;
pub mod search;
pub mod user;
