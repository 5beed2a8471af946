//! SQL DDL for the relational backend and the rows every fresh store starts with.

use crate::db::models::Table;

/// Courses written the first time the catalog resource is created.
pub const SEED_COURSES: [(&str, &str); 3] = [
    ("Web Development", "HTML, CSS, JS basics"),
    ("Data Science", "Python, ML basics"),
    ("Cloud Computing", "AWS/Azure/GCP basics"),
];

/// SQLite DDL per table. Key columns carry UNIQUE constraints so the
/// store itself rejects duplicate users, courses and enrollment pairs.
pub const fn sqlite_ddl(table: Table) -> &'static str {
    match table {
        Table::Users => {
            r#"
            CREATE TABLE users (
                username TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL
            )"#
        }
        Table::Courses => {
            r#"
            CREATE TABLE courses (
                title TEXT NOT NULL UNIQUE,
                overview TEXT NOT NULL
            )"#
        }
        Table::Enrollments => {
            r#"
            CREATE TABLE enrollments (
                username TEXT NOT NULL,
                title TEXT NOT NULL,
                UNIQUE (username, title)
            )"#
        }
    }
}
