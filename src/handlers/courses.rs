use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use serde::Serialize;

use crate::error::SkillError;
use crate::middleware::session::CurrentSession;
use crate::router::AppState;
use crate::service::{CourseDetail, CourseList, EnrollOutcome};
use crate::types::{Nav, Session};

#[derive(Debug, Serialize)]
pub struct CourseListResponse {
    pub courses: CourseList,
}

#[derive(Debug, Serialize)]
pub struct CoursePageResponse {
    #[serde(flatten)]
    pub detail: CourseDetail,
    pub session: Session,
}

#[derive(Debug, Serialize)]
pub struct EnrollResponse {
    pub outcome: EnrollOutcome,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MyCoursesResponse {
    pub username: String,
    pub courses: Vec<String>,
}

/// GET /courses
pub async fn list_courses_handler(
    State(state): State<AppState>,
) -> Result<Json<CourseListResponse>, SkillError> {
    let courses = state.catalog.list_courses().await?;
    Ok(Json(CourseListResponse { courses }))
}

/// GET /courses/{title} -> course page; the session moves onto it.
pub async fn course_page_handler(
    State(state): State<AppState>,
    Path(title): Path<String>,
    mut current: CurrentSession,
) -> Response {
    let outcome = match state.catalog.course(&title).await {
        Ok(detail) => {
            current.session.navigate(Nav::Course(detail.course.title.clone()));
            Ok(Json(CoursePageResponse {
                detail,
                session: current.session.clone(),
            }))
        }
        Err(e) => Err(e),
    };
    current.finish(&state, outcome)
}

/// POST /courses/{title}/enroll
pub async fn enroll_handler(
    State(state): State<AppState>,
    Path(title): Path<String>,
    current: CurrentSession,
) -> Response {
    let outcome = state
        .catalog
        .enroll(current.session.username(), &title)
        .await
        .map(|outcome| {
            Json(EnrollResponse {
                outcome,
                message: outcome.message(&title),
            })
        });
    current.finish(&state, outcome)
}

/// GET /my/courses
pub async fn my_courses_handler(
    State(state): State<AppState>,
    mut current: CurrentSession,
) -> Response {
    current.session.navigate(Nav::MyCourses);
    let outcome = match current.session.username() {
        Some(username) => state
            .catalog
            .list_enrollments(username)
            .await
            .map(|courses| {
                Json(MyCoursesResponse {
                    username: username.to_string(),
                    courses,
                })
            }),
        None => Err(SkillError::NotAuthenticated),
    };
    current.finish(&state, outcome)
}
