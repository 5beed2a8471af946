use crate::db::models::{Course, Enrollment, Record, Table, User};
use crate::db::schema::sqlite_ddl;
use crate::error::SkillError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;
use tracing::info;

pub type SqlitePool = Pool<Sqlite>;

/// Relational backend: one table per dataset, row-level inserts.
#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `database_url` and initialize the schema.
    pub async fn connect(database_url: &str) -> Result<Self, SkillError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let mut pool_opts = SqlitePoolOptions::new();
        if database_url.contains(":memory:") {
            // every connection to an in-memory database is a separate database
            pool_opts = pool_opts.max_connections(1);
        }
        let pool = pool_opts.connect_with(connect_opts).await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    /// Create missing tables. Courses are seeded only when their table is created.
    pub async fn init_schema(&self) -> Result<(), SkillError> {
        self.ensure::<User>().await?;
        self.ensure::<Course>().await?;
        self.ensure::<Enrollment>().await?;
        Ok(())
    }

    async fn ensure<R: Record>(&self) -> Result<(), SkillError> {
        let table = R::TABLE;
        let exists: Option<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?")
                .bind(table.name())
                .fetch_optional(&self.pool)
                .await?;
        if exists.is_some() {
            return Ok(());
        }

        let seed = R::seed();
        let mut tx = self.pool.begin().await?;
        sqlx::query(sqlite_ddl(table)).execute(&mut *tx).await?;
        for row in &seed {
            let [first, second] = row.columns();
            sqlx::query(&insert_sql(table))
                .bind(first)
                .bind(second)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        info!(table = table.name(), rows = seed.len(), "created table");
        Ok(())
    }

    /// All rows in insertion order.
    pub async fn load<R: Record>(&self) -> Result<Vec<R>, SkillError> {
        let table = R::TABLE;
        let [first, second] = table.columns();
        let rows = sqlx::query(&format!(
            "SELECT {first}, {second} FROM {} ORDER BY rowid",
            table.name()
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_record).collect()
    }

    /// Replace every row of the table inside a single transaction.
    pub async fn save<R: Record>(&self, rows: &[R]) -> Result<(), SkillError> {
        let table = R::TABLE;
        let mut tx = self.pool.begin().await?;
        sqlx::query(&format!("DELETE FROM {}", table.name()))
            .execute(&mut *tx)
            .await?;
        for row in rows {
            let [first, second] = row.columns();
            sqlx::query(&insert_sql(table))
                .bind(first)
                .bind(second)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    pub async fn append<R: Record>(&self, row: R) -> Result<(), SkillError> {
        let [first, second] = row.columns();
        sqlx::query(&insert_sql(R::TABLE))
            .bind(first)
            .bind(second)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    fn row_to_record<R: Record>(row: SqliteRow) -> Result<R, SkillError> {
        let [first, second] = R::TABLE.columns();
        let first: String = row.try_get(first)?;
        let second: String = row.try_get(second)?;
        Ok(R::from_columns(first, second))
    }
}

fn insert_sql(table: Table) -> String {
    let [first, second] = table.columns();
    format!(
        "INSERT INTO {} ({first}, {second}) VALUES (?, ?)",
        table.name()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn open(dir: &tempfile::TempDir) -> SqliteStorage {
        let url = format!("sqlite:{}", dir.path().join("skillharbour.sqlite").display());
        SqliteStorage::connect(&url).await.expect("connect")
    }

    #[tokio::test]
    async fn fresh_database_is_seeded_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = open(&dir).await;

        let courses: Vec<Course> = store.load().await.expect("load");
        assert_eq!(courses.len(), 3);
        assert_eq!(courses[0].title, "Web Development");

        store.save::<Course>(&courses[..1]).await.expect("save");
        drop(store);

        // reopening must not re-seed an existing table
        let store = open(&dir).await;
        let courses: Vec<Course> = store.load().await.expect("load");
        assert_eq!(courses.len(), 1);
    }

    #[tokio::test]
    async fn unique_constraint_rejects_duplicate_enrollment() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = open(&dir).await;
        let row = Enrollment::from_columns("alice".into(), "Data Science".into());

        store.append(row.clone()).await.expect("first insert");
        let err = store.append(row).await.expect_err("duplicate must fail");
        assert!(matches!(err, SkillError::DatabaseError(_)));

        let rows: Vec<Enrollment> = store.load().await.expect("load");
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn in_memory_database_keeps_state_across_calls() {
        let store = SqliteStorage::connect("sqlite::memory:")
            .await
            .expect("connect");
        store
            .append(User::from_columns("bob".into(), "pw".into()))
            .await
            .expect("append");
        let users: Vec<User> = store.load().await.expect("load");
        assert_eq!(users.len(), 1);
    }
}
