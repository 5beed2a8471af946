//! Record store: the users, courses and enrollments tables.
//!
//! Layout:
//! - `models.rs`: row types and the `Record` trait tying each to its table
//! - `schema.rs`: seed rows and SQLite DDL
//! - `flatfile.rs`: CSV backend, whole-file rewrite per write
//! - `sqlite.rs`: SQLite backend, row-level inserts

pub mod flatfile;
pub mod models;
pub mod schema;
pub mod sqlite;

pub use flatfile::CsvStorage;
pub use models::{Course, Enrollment, Record, Table, User};
pub use sqlite::{SqlitePool, SqliteStorage};

use crate::config::{StorageBackend, StorageConfig};
use crate::error::SkillError;
use std::marker::PhantomData;
use tokio::sync::{Mutex, MutexGuard};
use tracing::info;

/// The configured backend.
#[derive(Clone)]
pub enum Storage {
    Csv(CsvStorage),
    Sqlite(SqliteStorage),
}

impl Storage {
    pub async fn open(cfg: &StorageConfig) -> Result<Self, SkillError> {
        let storage = match cfg.backend {
            StorageBackend::Csv => {
                let csv = CsvStorage::new(cfg);
                csv.init().await?;
                info!(data_dir = %cfg.data_dir.display(), "using CSV storage");
                Storage::Csv(csv)
            }
            StorageBackend::Sqlite => {
                let sqlite = SqliteStorage::connect(&cfg.database_url).await?;
                info!(database_url = %cfg.database_url, "using SQLite storage");
                Storage::Sqlite(sqlite)
            }
        };
        Ok(storage)
    }

    pub async fn load<R: Record>(&self) -> Result<Vec<R>, SkillError> {
        match self {
            Storage::Csv(s) => s.load().await,
            Storage::Sqlite(s) => s.load().await,
        }
    }

    pub async fn save<R: Record>(&self, rows: &[R]) -> Result<(), SkillError> {
        match self {
            Storage::Csv(s) => s.save(rows).await,
            Storage::Sqlite(s) => s.save(rows).await,
        }
    }

    pub async fn append<R: Record>(&self, row: R) -> Result<(), SkillError> {
        match self {
            Storage::Csv(s) => s.append(row).await,
            Storage::Sqlite(s) => s.append(row).await,
        }
    }
}

/// Storage plus one mutex per table. A read-modify-write holds the
/// table's guard for its whole duration.
pub struct Records {
    storage: Storage,
    users: Mutex<()>,
    courses: Mutex<()>,
    enrollments: Mutex<()>,
}

impl Records {
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            users: Mutex::new(()),
            courses: Mutex::new(()),
            enrollments: Mutex::new(()),
        }
    }

    pub async fn open(cfg: &StorageConfig) -> Result<Self, SkillError> {
        Ok(Self::new(Storage::open(cfg).await?))
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Exclusive access to the table holding `R`.
    pub async fn lock<R: Record>(&self) -> TableGuard<'_, R> {
        let mutex = match R::TABLE {
            Table::Users => &self.users,
            Table::Courses => &self.courses,
            Table::Enrollments => &self.enrollments,
        };
        TableGuard {
            storage: &self.storage,
            _guard: mutex.lock().await,
            _row: PhantomData,
        }
    }

    /// One-shot read of a whole table.
    pub async fn load<R: Record>(&self) -> Result<Vec<R>, SkillError> {
        self.lock::<R>().await.load().await
    }
}

pub struct TableGuard<'a, R> {
    storage: &'a Storage,
    _guard: MutexGuard<'a, ()>,
    _row: PhantomData<fn() -> R>,
}

impl<R: Record> TableGuard<'_, R> {
    pub async fn load(&self) -> Result<Vec<R>, SkillError> {
        self.storage.load().await
    }

    pub async fn save(&self, rows: &[R]) -> Result<(), SkillError> {
        self.storage.save(rows).await
    }

    pub async fn append(&self, row: R) -> Result<(), SkillError> {
        self.storage.append(row).await
    }
}
