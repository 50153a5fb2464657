use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::Row;
use tracing::{debug, info, warn};

use super::connection::DbConnection;
use super::document::{ExpenseDocument, StoredDocument};
use super::traits::{ExpenseStorage, InsertError};
use crate::domain::models::expense::ExpenseRecord;

/// Name of the logical collection holding expense documents
pub const EXPENSE_COLLECTION: &str = "expenses";

/// Document-store backed expense repository
#[derive(Clone)]
pub struct ExpenseRepository {
    connection: DbConnection,
}

impl ExpenseRepository {
    pub fn new(connection: DbConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl ExpenseStorage for ExpenseRepository {
    async fn fetch_all(&self) -> Result<Vec<ExpenseRecord>> {
        let rows = sqlx::query("SELECT id, body FROM documents WHERE collection = ? ORDER BY seq ASC")
            .bind(EXPENSE_COLLECTION)
            .fetch_all(self.connection.pool())
            .await
            .context("failed to read expense documents")?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row.get("id");
            let body: String = row.get("body");

            let decoded = serde_json::from_str::<StoredDocument>(&body)
                .map_err(|e| e.to_string())
                .and_then(|doc| doc.into_record().map_err(|e| e.to_string()));

            match decoded {
                Ok(record) => records.push(record),
                Err(reason) => warn!("Skipping unreadable expense document {}: {}", id, reason),
            }
        }

        debug!("Fetched {} expense documents", records.len());
        Ok(records)
    }

    async fn insert_one(&self, record: &ExpenseRecord) -> Result<(), InsertError> {
        let document = ExpenseDocument::from(record);
        document.check_shape()?;

        let body = serde_json::to_string(&document).context("failed to encode expense document")?;
        let id = uuid::Uuid::new_v4().to_string();

        sqlx::query("INSERT INTO documents (id, collection, body) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(EXPENSE_COLLECTION)
            .bind(&body)
            .execute(self.connection.pool())
            .await
            .context("failed to insert expense document")?;

        info!("Inserted expense document {}", id);
        Ok(())
    }
}
