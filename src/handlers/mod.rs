pub mod auth;
pub mod courses;
pub mod session;
