use crate::db::{Course, Enrollment, Records};
use crate::error::SkillError;
use crate::types::{CourseContent, course_content};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Courses in storage order. Iterating borrows, so the list can be walked
/// any number of times.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CourseList(Vec<Course>);

impl CourseList {
    pub fn iter(&self) -> std::slice::Iter<'_, Course> {
        self.0.iter()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|c| c.title.as_str())
    }

    pub fn get(&self, title: &str) -> Option<&Course> {
        self.0.iter().find(|c| c.title == title)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a CourseList {
    type Item = &'a Course;
    type IntoIter = std::slice::Iter<'a, Course>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A course row plus the static page content bundled for it.
#[derive(Debug, Serialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: Course,
    pub content: &'static CourseContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollOutcome {
    Enrolled,
    AlreadyEnrolled,
}

impl EnrollOutcome {
    pub fn message(self, title: &str) -> String {
        match self {
            EnrollOutcome::Enrolled => format!("Enrolled in {title}!"),
            EnrollOutcome::AlreadyEnrolled => format!("You are already enrolled in {title}."),
        }
    }
}

#[derive(Clone)]
pub struct CatalogService {
    records: Arc<Records>,
    enforce_course_exists: bool,
}

impl CatalogService {
    pub fn new(records: Arc<Records>, enforce_course_exists: bool) -> Self {
        Self {
            records,
            enforce_course_exists,
        }
    }

    pub async fn list_courses(&self) -> Result<CourseList, SkillError> {
        Ok(CourseList(self.records.load::<Course>().await?))
    }

    pub async fn course(&self, title: &str) -> Result<CourseDetail, SkillError> {
        let course = self
            .list_courses()
            .await?
            .0
            .into_iter()
            .find(|c| c.title == title)
            .ok_or_else(|| SkillError::UnknownCourse(title.to_string()))?;
        Ok(CourseDetail {
            content: course_content(&course.title),
            course,
        })
    }

    /// Titles `username` is enrolled in, in storage order.
    pub async fn list_enrollments(&self, username: &str) -> Result<Vec<String>, SkillError> {
        let rows = self.records.load::<Enrollment>().await?;
        Ok(rows
            .into_iter()
            .filter(|e| e.username == username)
            .map(|e| e.title)
            .collect())
    }

    /// Idempotent: an existing (username, title) pair is reported and not rewritten.
    pub async fn enroll(
        &self,
        username: Option<&str>,
        title: &str,
    ) -> Result<EnrollOutcome, SkillError> {
        let Some(username) = username.filter(|u| !u.is_empty()) else {
            return Err(SkillError::NotAuthenticated);
        };

        if self.enforce_course_exists && self.list_courses().await?.get(title).is_none() {
            return Err(SkillError::UnknownCourse(title.to_string()));
        }

        let enrollments = self.records.lock::<Enrollment>().await;
        if enrollments
            .load()
            .await?
            .iter()
            .any(|e| e.matches(username, title))
        {
            debug!(username, title, "already enrolled");
            return Ok(EnrollOutcome::AlreadyEnrolled);
        }
        enrollments
            .append(Enrollment {
                username: username.to_string(),
                title: title.to_string(),
            })
            .await?;

        info!(username, title, "enrolled");
        Ok(EnrollOutcome::Enrolled)
    }
}
