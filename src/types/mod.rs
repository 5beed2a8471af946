pub mod content;
pub mod page;
pub mod session;

pub use content::{CourseContent, course_content};
pub use page::{Nav, Page, Transition};
pub use session::{Session, SessionToken};
