use anyhow::{Context, Result};
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};
use std::sync::Arc;
use tracing::info;

use super::expense_repository::ExpenseRepository;
use super::traits::Connection;

/// DbConnection owns the long-lived SQLite pool for the document store
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open (creating if needed) the database behind `url`
    pub async fn new(url: &str) -> Result<Self> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            info!("Creating expense database");
            Sqlite::create_database(url)
                .await
                .context("failed to create expense database")?;
        }

        // Keep one connection open so shared-cache in-memory databases survive
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .min_connections(1)
            .connect(url)
            .await
            .context("failed to connect to expense database")?;

        Self::setup_schema(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Open a private in-memory database, used by tests
    pub async fn new_in_memory() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().simple().to_string();
        let db_url = format!("sqlite:file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                collection TEXT NOT NULL,
                body TEXT NOT NULL,
                inserted_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_documents_collection
            ON documents(collection);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

impl Connection for DbConnection {
    type ExpenseRepository = ExpenseRepository;

    fn create_expense_repository(&self) -> Self::ExpenseRepository {
        ExpenseRepository::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Row;

    #[tokio::test]
    async fn test_schema_is_created() {
        let db = DbConnection::new_in_memory().await.expect("Failed to open database");

        let row = sqlx::query(
            "SELECT COUNT(*) AS n FROM sqlite_master WHERE type = 'table' AND name = 'documents'",
        )
        .fetch_one(db.pool())
        .await
        .unwrap();

        let count: i64 = row.get("n");
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_file_database_is_created_on_demand() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("expenses.db");
        let url = format!("sqlite:{}", path.display());

        let _db = DbConnection::new(&url).await.expect("Failed to create file database");

        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_in_memory_databases_are_isolated() {
        let first = DbConnection::new_in_memory().await.unwrap();
        let second = DbConnection::new_in_memory().await.unwrap();

        sqlx::query("INSERT INTO documents (id, collection, body) VALUES ('a', 'expenses', '{}')")
            .execute(first.pool())
            .await
            .unwrap();

        let row = sqlx::query("SELECT COUNT(*) AS n FROM documents")
            .fetch_one(second.pool())
            .await
            .unwrap();
        let count: i64 = row.get("n");
        assert_eq!(count, 0);
    }
}
