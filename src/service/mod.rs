pub mod auth;
pub mod catalog;
pub mod sessions_actor;

pub use auth::AuthService;
pub use catalog::{CatalogService, CourseDetail, CourseList, EnrollOutcome};
pub use sessions_actor::SessionsHandle;
