//! Storage initialization: data directory, connection and schema.

use crate::config::database_file;
use crate::error::TrainError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// An open, schema-ready train database.
///
/// Holds a single connection. Call [`Storage::close`] before the process exits.
pub struct Storage {
    pool: SqlitePool,
    path: PathBuf,
}

impl Storage {
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the connection.
    pub async fn close(self) {
        self.pool.close().await;
        debug!(path = %self.path.display(), "Database connection closed");
    }
}

/// Create `dir` and its parents if absent. Succeeds when the directory already exists.
pub fn ensure_data_dir(dir: &Path) -> Result<(), TrainError> {
    std::fs::create_dir_all(dir).map_err(|e| {
        TrainError::ConnectionFailure(format!(
            "cannot create data directory {}: {}",
            dir.display(),
            e
        ))
    })
}

/// Open `<data_dir>/<db_name>.db`, creating the directory, the file and the tables as needed.
///
/// Any failure yields `TrainError::ConnectionFailure` and no handle.
pub async fn open_storage(data_dir: &Path, db_name: &str) -> Result<Storage, TrainError> {
    let result = connect(data_dir, db_name).await;
    match &result {
        Ok(storage) => info!(path = %storage.path.display(), "Database connection established"),
        Err(e) => error!(error = %e, "Failed to connect to database"),
    }
    result
}

async fn connect(data_dir: &Path, db_name: &str) -> Result<Storage, TrainError> {
    ensure_data_dir(data_dir)?;
    let path = database_file(data_dir, db_name);

    let options = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .after_connect(|conn, _meta| Box::pin(async move { configure_pragmas_conn(conn).await }))
        .connect_with(options)
        .await
        .map_err(|e| {
            TrainError::ConnectionFailure(format!("cannot open {}: {}", path.display(), e))
        })?;

    if let Err(e) = run_migrations(&pool).await {
        pool.close().await;
        return Err(TrainError::ConnectionFailure(format!(
            "cannot create schema in {}: {}",
            path.display(),
            e
        )));
    }

    Ok(Storage { pool, path })
}

/// Create the `trains` and `stations` tables if they do not exist yet.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    debug!("Ensuring schema");
    let schema_sql = include_str!("schema.sql");

    for statement in schema_sql.split(';') {
        let trimmed = statement.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed).execute(pool).await?;
        }
    }

    Ok(())
}

async fn configure_pragmas_conn(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&mut *conn)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_open_creates_directory_and_file() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("nested").join("data");

        let storage = open_storage(&data_dir, "trains")
            .await
            .expect("open_storage failed");
        assert!(data_dir.is_dir());
        assert_eq!(storage.path(), data_dir.join("trains.db"));
        assert!(storage.path().exists());

        let result: (i64,) = sqlx::query_as("SELECT 1")
            .fetch_one(storage.pool())
            .await
            .expect("query failed");
        assert_eq!(result.0, 1);
        storage.close().await;
    }

    #[tokio::test]
    async fn test_schema_creates_both_tables() {
        let temp_dir = TempDir::new().unwrap();
        let storage = open_storage(temp_dir.path(), "trains").await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('trains', 'stations') ORDER BY name",
        )
        .fetch_all(storage.pool())
        .await
        .expect("query failed");
        let names: Vec<&str> = tables.iter().map(|t| t.0.as_str()).collect();
        assert_eq!(names, vec!["stations", "trains"]);
        storage.close().await;
    }

    #[tokio::test]
    async fn test_station_references_train() {
        let temp_dir = TempDir::new().unwrap();
        let storage = open_storage(temp_dir.path(), "trains").await.unwrap();

        let (table, from, to): (String, String, String) = sqlx::query_as(
            r#"SELECT "table", "from", "to" FROM pragma_foreign_key_list('stations')"#,
        )
        .fetch_one(storage.pool())
        .await
        .expect("query failed");
        assert_eq!(table, "trains");
        assert_eq!(from, "train_id");
        assert_eq!(to, "id");

        let (enabled,): (i64,) = sqlx::query_as("PRAGMA foreign_keys")
            .fetch_one(storage.pool())
            .await
            .unwrap();
        assert_eq!(enabled, 1);
        storage.close().await;
    }

    #[tokio::test]
    async fn test_reopen_is_idempotent_and_keeps_rows() {
        let temp_dir = TempDir::new().unwrap();
        let storage = open_storage(temp_dir.path(), "trains").await.unwrap();
        sqlx::query("INSERT INTO trains (destination, number, time) VALUES ('Москва', '001A', '10:00')")
            .execute(storage.pool())
            .await
            .unwrap();
        run_migrations(storage.pool())
            .await
            .expect("second migration run failed");
        storage.close().await;

        let storage = open_storage(temp_dir.path(), "trains").await.unwrap();
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM trains")
            .fetch_one(storage.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
        storage.close().await;
    }

    #[test]
    fn test_ensure_data_dir_existing() {
        let temp_dir = TempDir::new().unwrap();
        ensure_data_dir(temp_dir.path()).expect("existing dir must be accepted");
        ensure_data_dir(temp_dir.path()).expect("second call must be a no-op");
    }

    #[tokio::test]
    async fn test_open_under_a_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        match open_storage(&blocker.join("data"), "trains").await {
            Err(TrainError::ConnectionFailure(_)) => {}
            Err(other) => panic!("Expected ConnectionFailure, got {other}"),
            Ok(_) => panic!("Expected ConnectionFailure, got a handle"),
        }
    }
}
