use crate::config::StorageConfig;
use crate::db::models::{Course, Enrollment, Record, Table, User};
use crate::error::SkillError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// One CSV file per table, read and rewritten whole on every operation.
#[derive(Debug, Clone)]
pub struct CsvStorage {
    data_dir: PathBuf,
    users: PathBuf,
    courses: PathBuf,
    enrollments: PathBuf,
}

impl CsvStorage {
    pub fn new(cfg: &StorageConfig) -> Self {
        Self {
            data_dir: cfg.data_dir.clone(),
            users: cfg.users_path(),
            courses: cfg.courses_path(),
            enrollments: cfg.enrollments_path(),
        }
    }

    pub fn path(&self, table: Table) -> &Path {
        match table {
            Table::Users => &self.users,
            Table::Courses => &self.courses,
            Table::Enrollments => &self.enrollments,
        }
    }

    /// Create any missing file with its header (and seed rows for courses).
    pub async fn init(&self) -> Result<(), SkillError> {
        fs::create_dir_all(&self.data_dir).await?;
        self.ensure::<User>().await?;
        self.ensure::<Course>().await?;
        self.ensure::<Enrollment>().await?;
        Ok(())
    }

    async fn ensure<R: Record>(&self) -> Result<(), SkillError> {
        if fs::try_exists(self.path(R::TABLE)).await? {
            return Ok(());
        }
        let seed = R::seed();
        self.save(&seed).await?;
        info!(
            table = R::TABLE.name(),
            path = %self.path(R::TABLE).display(),
            rows = seed.len(),
            "created table file"
        );
        Ok(())
    }

    pub async fn load<R: Record>(&self) -> Result<Vec<R>, SkillError> {
        let path = self.path(R::TABLE);
        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.ensure::<R>().await?;
                return Ok(R::seed());
            }
            Err(e) => return Err(e.into()),
        };
        let rows = decode::<R>(&bytes)?;
        debug!(table = R::TABLE.name(), rows = rows.len(), "loaded table");
        Ok(rows)
    }

    /// Replace the whole file. The new content is written to a sibling
    /// temp file first and renamed over the old one.
    pub async fn save<R: Record>(&self, rows: &[R]) -> Result<(), SkillError> {
        let path = self.path(R::TABLE);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let bytes = encode(rows)?;
        let tmp = tmp_path(path);
        fs::write(&tmp, bytes).await?;
        fs::rename(&tmp, path).await?;
        debug!(table = R::TABLE.name(), rows = rows.len(), "saved table");
        Ok(())
    }

    pub async fn append<R: Record>(&self, row: R) -> Result<(), SkillError> {
        let mut rows = self.load::<R>().await?;
        rows.push(row);
        self.save(&rows).await
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn decode<R: Record>(bytes: &[u8]) -> Result<Vec<R>, SkillError> {
    let mut reader = csv::Reader::from_reader(bytes);
    let rows = reader.deserialize::<R>().collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn encode<R: Record>(rows: &[R]) -> Result<Vec<u8>, SkillError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(R::TABLE.columns())?;
    for row in rows {
        writer.write_record(row.columns())?;
    }
    writer
        .into_inner()
        .map_err(|e| SkillError::Io(e.into_error()))
}
