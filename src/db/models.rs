use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::db::schema::SEED_COURSES;

/// The three durable datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Users,
    Courses,
    Enrollments,
}

impl Table {
    pub const fn name(self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Courses => "courses",
            Table::Enrollments => "enrollments",
        }
    }

    /// Column order, also the CSV header.
    pub const fn columns(self) -> [&'static str; 2] {
        match self {
            Table::Users => ["username", "password"],
            Table::Courses => ["title", "overview"],
            Table::Enrollments => ["username", "title"],
        }
    }
}

/// A row of one of the tables. Every table holds exactly two text columns.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const TABLE: Table;

    fn from_columns(first: String, second: String) -> Self;

    fn columns(&self) -> [&str; 2];

    /// Rows written when the backing resource is created.
    fn seed() -> Vec<Self> {
        Vec::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    /// Stored and compared as plaintext.
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    pub overview: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub username: String,
    pub title: String,
}

impl Record for User {
    const TABLE: Table = Table::Users;

    fn from_columns(username: String, password: String) -> Self {
        Self { username, password }
    }

    fn columns(&self) -> [&str; 2] {
        [&self.username, &self.password]
    }
}

impl Record for Course {
    const TABLE: Table = Table::Courses;

    fn from_columns(title: String, overview: String) -> Self {
        Self { title, overview }
    }

    fn columns(&self) -> [&str; 2] {
        [&self.title, &self.overview]
    }

    fn seed() -> Vec<Self> {
        SEED_COURSES
            .iter()
            .map(|(title, overview)| Course::from_columns(title.to_string(), overview.to_string()))
            .collect()
    }
}

impl Record for Enrollment {
    const TABLE: Table = Table::Enrollments;

    fn from_columns(username: String, title: String) -> Self {
        Self { username, title }
    }

    fn columns(&self) -> [&str; 2] {
        [&self.username, &self.title]
    }
}

impl Enrollment {
    pub fn matches(&self, username: &str, title: &str) -> bool {
        self.username == username && self.title == title
    }
}
